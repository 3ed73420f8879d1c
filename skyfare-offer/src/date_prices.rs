//! Price estimates for the date strip above the results.
//!
//! Only the selected day has a real quote. Neighbouring days show a price seen
//! earlier in the session when there is one, otherwise a deterministic
//! estimate derived from the date itself so that the strip does not shuffle
//! between renders.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reference price used before any real result has been observed
pub const DEFAULT_BASE_PRICE: u64 = 5000;

/// Days shown on each side of the selected date
pub const WINDOW_RADIUS: i64 = 3;

/// ISO date => lowest real price observed for that date
pub type PriceCache = BTreeMap<NaiveDate, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePriceEntry {
    /// "15 Feb"
    pub date: String,
    /// "Sun"
    pub day_name: String,
    pub full_date: NaiveDate,
    pub price: u64,
    pub is_cheapest: bool,
}

/// Percentage deviation in `-20..20` derived from the ISO date string.
pub fn date_variance(date: NaiveDate) -> i64 {
    let iso = date.format("%Y-%m-%d").to_string();
    let hash: i64 = iso.bytes().map(i64::from).sum();
    (hash % 40) - 20
}

/// `round(base * (1 + variance / 100))` for the given date.
pub fn estimate_price(date: NaiveDate, base_price: u64) -> u64 {
    let factor = 1.0 + date_variance(date) as f64 / 100.0;
    (base_price as f64 * factor).round().max(0.0) as u64
}

/// Seven entries centred on `selected`.
///
/// The selected day always shows `current_price`; other days prefer the
/// cached real price and fall back to the estimate from `base_price`.
pub fn generate_date_prices(
    selected: NaiveDate,
    base_price: u64,
    current_price: u64,
    cache: &PriceCache,
) -> Vec<DatePriceEntry> {
    let mut entries: Vec<DatePriceEntry> = (-WINDOW_RADIUS..=WINDOW_RADIUS)
        .filter_map(|offset| {
            let day = selected.checked_add_signed(Duration::days(offset))?;
            let price = if offset == 0 {
                current_price
            } else {
                cache
                    .get(&day)
                    .copied()
                    .unwrap_or_else(|| estimate_price(day, base_price))
            };
            Some(DatePriceEntry {
                date: day.format("%-d %b").to_string(),
                day_name: day.format("%a").to_string(),
                full_date: day,
                price,
                is_cheapest: false,
            })
        })
        .collect();

    if let Some(cheapest) = entries.iter().map(|e| e.price).min() {
        for entry in entries.iter_mut() {
            entry.is_cheapest = entry.price == cheapest;
        }
    }

    entries
}
