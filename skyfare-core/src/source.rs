use async_trait::async_trait;
use skyfare_shared::{FlightOffer, Place};
use crate::search::SearchParams;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Upstream request failed: {0}")]
    Transport(String),
    #[error("Upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Upstream payload could not be decoded: {0}")]
    Decode(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Upstream flight-offer provider.
///
/// Implementations report failures honestly; absorbing them into empty
/// results is the caller's job.
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Airport/city suggestions for a typeahead query
    async fn search_places(&self, query: &str) -> SourceResult<Vec<Place>>;

    /// Priced offers for a search, cheapest first as returned upstream
    async fn search_offers(&self, params: &SearchParams) -> SourceResult<Vec<FlightOffer>>;

    /// A single offer by its upstream id
    async fn get_offer(&self, id: &str) -> SourceResult<Option<FlightOffer>>;
}
