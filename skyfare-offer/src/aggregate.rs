use serde::Serialize;
use skyfare_core::duration::parse_minutes;
use skyfare_shared::FlightOffer;
use std::collections::BTreeMap;
use crate::filter::stop_bucket;

/// Duration slider ceiling when no offer reports a usable duration (minutes)
pub const FALLBACK_MAX_DURATION: u32 = 1200;

/// Per-option result counts shown next to each filter checkbox
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    pub stops: BTreeMap<u32, usize>,
    pub airlines: BTreeMap<String, usize>,
}

/// Figures computed over the unfiltered result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    pub counts: FilterCounts,
    pub max_duration: u32,
    /// Distinct airline names in first-seen order
    pub available_airlines: Vec<String>,
}

impl Aggregates {
    pub fn compute(offers: &[FlightOffer]) -> Self {
        Self::compute_with_fallback(offers, FALLBACK_MAX_DURATION)
    }

    pub fn compute_with_fallback(offers: &[FlightOffer], fallback_max_duration: u32) -> Self {
        let mut counts = FilterCounts::default();
        let mut available_airlines: Vec<String> = Vec::new();

        for offer in offers {
            *counts.stops.entry(stop_bucket(offer.outbound.stops)).or_insert(0) += 1;

            let name = offer.airline.name.as_str();
            if name.is_empty() {
                continue;
            }
            *counts.airlines.entry(name.to_string()).or_insert(0) += 1;
            if !available_airlines.iter().any(|a| a == name) {
                available_airlines.push(name.to_string());
            }
        }

        Self {
            counts,
            max_duration: max_duration(offers, fallback_max_duration),
            available_airlines,
        }
    }
}

/// Longest outbound duration in minutes, or `fallback` when nothing parses.
pub fn max_duration(offers: &[FlightOffer], fallback: u32) -> u32 {
    offers
        .iter()
        .map(|o| parse_minutes(&o.outbound.duration))
        .max()
        .filter(|m| *m > 0)
        .unwrap_or(fallback)
}
