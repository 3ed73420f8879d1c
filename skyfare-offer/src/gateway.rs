//! Boundary between the pipeline and the upstream source.
//!
//! Upstream failures stop here: they are logged and turned into empty
//! results, so nothing past this module ever handles a `SourceError`.

use skyfare_core::{OfferSource, SearchParams};
use skyfare_shared::{Airport, FlightOffer};
use tracing::{error, info};

/// Message shown to the traveller when a flight search fails
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch flights. Please try again.";

/// Offers from one search plus a user-facing error when it failed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    pub offers: Vec<FlightOffer>,
    pub error: Option<String>,
}

impl SearchOutcome {
    pub fn offers(offers: Vec<FlightOffer>) -> Self {
        Self { offers, error: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { offers: Vec::new(), error: Some(message.into()) }
    }
}

/// Airport suggestions; empty for a blank query or any upstream failure.
pub async fn search_airports(source: &dyn OfferSource, query: &str) -> Vec<Airport> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    match source.search_places(query).await {
        Ok(places) => places.into_iter().map(Airport::from).collect(),
        Err(e) => {
            error!("Error searching airports for {:?}: {}", query, e);
            Vec::new()
        }
    }
}

pub async fn search_flights(source: &dyn OfferSource, params: &SearchParams) -> SearchOutcome {
    match source.search_offers(params).await {
        Ok(offers) => {
            info!(
                "Found {} offers for {} -> {} on {}",
                offers.len(),
                params.from,
                params.to,
                params.depart_date
            );
            SearchOutcome::offers(offers)
        }
        Err(e) => {
            error!("Error searching flights {} -> {}: {}", params.from, params.to, e);
            SearchOutcome::failed(SEARCH_FAILED_MESSAGE)
        }
    }
}

/// Offer for the detail page; None when missing or on upstream failure.
pub async fn get_offer(source: &dyn OfferSource, id: &str) -> Option<FlightOffer> {
    match source.get_offer(id).await {
        Ok(offer) => offer,
        Err(e) => {
            error!("Error fetching offer {}: {}", id, e);
            None
        }
    }
}
