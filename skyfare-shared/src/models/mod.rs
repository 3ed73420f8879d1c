pub mod offer;
pub mod place;
