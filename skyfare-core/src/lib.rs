pub mod duration;
pub mod search;
pub mod source;

pub use search::{CabinClass, RouteKey, SearchParams};
pub use source::{OfferSource, SourceError, SourceResult};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
