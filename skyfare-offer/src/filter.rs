use serde::{Deserialize, Serialize};
use skyfare_core::duration::parse_minutes;
use skyfare_shared::FlightOffer;
use std::collections::BTreeSet;

/// Default duration ceiling before any results arrive (minutes)
pub const DEFAULT_MAX_DURATION: u32 = 2000;

/// Stop-count bucket that stands for "2 or more stops"
pub const MULTI_STOP_BUCKET: u32 = 2;

/// Bucket an outbound stop count falls into: 0, 1, or 2 for "2+".
pub fn stop_bucket(stops: u32) -> u32 {
    stops.min(MULTI_STOP_BUCKET)
}

/// User-chosen narrowing criteria.
///
/// Empty sets mean "no constraint". `departure_time` is a half-open hour
/// range `[lo, hi)` and `duration` an inclusive minute ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub stops: BTreeSet<u32>,
    #[serde(default)]
    pub airlines: BTreeSet<String>,
    #[serde(default = "full_day")]
    pub departure_time: [u32; 2],
    #[serde(default = "default_duration")]
    pub duration: u32,
}

fn full_day() -> [u32; 2] { [0, 24] }

fn default_duration() -> u32 { DEFAULT_MAX_DURATION }

impl Default for FilterState {
    fn default() -> Self {
        Self {
            stops: BTreeSet::new(),
            airlines: BTreeSet::new(),
            departure_time: full_day(),
            duration: DEFAULT_MAX_DURATION,
        }
    }
}

impl FilterState {
    /// Checks the ranges a UI could get wrong. Returns a description of the
    /// first problem found.
    pub fn check(&self) -> Result<(), String> {
        let [lo, hi] = self.departure_time;
        if lo > hi || hi > 24 {
            return Err(format!("departure window [{}, {}) is outside 0..=24", lo, hi));
        }
        if let Some(bad) = self.stops.iter().find(|s| **s > MULTI_STOP_BUCKET) {
            return Err(format!("unknown stop bucket {}", bad));
        }
        Ok(())
    }

    /// Whether one offer passes every active predicate.
    pub fn matches(&self, offer: &FlightOffer) -> bool {
        let outbound = &offer.outbound;

        if !self.stops.is_empty() && !self.stops.contains(&stop_bucket(outbound.stops)) {
            return false;
        }

        if !self.airlines.is_empty() && !self.airlines.contains(&offer.airline.name) {
            return false;
        }

        if let Some(hour) = departure_hour(&outbound.departure.time) {
            let [lo, hi] = self.departure_time;
            if hour < lo || hour >= hi {
                return false;
            }
        }

        if !outbound.duration.trim().is_empty() && parse_minutes(&outbound.duration) > self.duration {
            return false;
        }

        true
    }
}

/// Leading hour of an "HH:MM" display time; None when there is no number.
pub fn departure_hour(time: &str) -> Option<u32> {
    let head = time.trim().split(':').next()?;
    let digits: String = head.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Offers passing `filters`, in their original relative order.
pub fn apply_filters<'a>(offers: &'a [FlightOffer], filters: &FilterState) -> Vec<&'a FlightOffer> {
    offers.iter().filter(|offer| filters.matches(offer)).collect()
}
