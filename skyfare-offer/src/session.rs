//! Per-traveller search state.
//!
//! A `SearchSession` owns the raw offers, the active filters and the price
//! memory behind the date strip. All mutation goes through the update
//! functions below; everything the results page shows is derived on demand
//! by [`SearchSession::view`].

use serde::Serialize;
use skyfare_core::{RouteKey, SearchParams};
use skyfare_shared::FlightOffer;
use tracing::{debug, info};

use crate::aggregate::{Aggregates, FilterCounts, FALLBACK_MAX_DURATION};
use crate::date_prices::{generate_date_prices, DatePriceEntry, PriceCache, DEFAULT_BASE_PRICE};
use crate::filter::{apply_filters, FilterState};
use crate::gateway::SearchOutcome;
use crate::ordering::{cheapest_price, min_price, sort_by_price};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub default_base_price: u64,
    pub fallback_max_duration: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_base_price: DEFAULT_BASE_PRICE,
            fallback_max_duration: FALLBACK_MAX_DURATION,
        }
    }
}

/// Handle for one upstream search. Only the most recently issued ticket can
/// complete; older ones are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    pub sequence: u64,
}

/// Stable base price and price cache. Always reset together.
#[derive(Debug, Clone, Default)]
struct PriceMemory {
    stable_base: Option<u64>,
    cache: PriceCache,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    pub params: Option<SearchParams>,
    /// Filtered offers, cheapest first
    pub offers: Vec<FlightOffer>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub cheapest_price: Option<f64>,
    pub max_duration: u32,
    pub filter_counts: FilterCounts,
    pub available_airlines: Vec<String>,
    pub date_prices: Vec<DatePriceEntry>,
    pub filters: FilterState,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    settings: SessionSettings,
    params: Option<SearchParams>,
    route: Option<RouteKey>,
    filters: FilterState,
    offers: Vec<FlightOffer>,
    loading: bool,
    error: Option<String>,
    prices: PriceMemory,
    sequence: u64,
}

impl SearchSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings, ..Default::default() }
    }

    pub fn params(&self) -> Option<&SearchParams> {
        self.params.as_ref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn offers(&self) -> &[FlightOffer] {
        &self.offers
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn stable_base_price(&self) -> Option<u64> {
        self.prices.stable_base
    }

    pub fn price_cache(&self) -> &PriceCache {
        &self.prices.cache
    }

    /// Records a new search context and hands out a ticket for the fetch.
    ///
    /// Returns None when `params` equals the current context and the last
    /// search did not fail: the offers on hand are already the answer.
    pub fn begin_search(&mut self, params: SearchParams) -> Option<SearchTicket> {
        if self.params.as_ref() == Some(&params) && self.error.is_none() {
            debug!("Search context unchanged, skipping fetch");
            return None;
        }

        let route = params.route_key();
        if self.route.as_ref() != Some(&route) {
            info!("Route changed to {} -> {}, clearing price memory", route.from, route.to);
            self.prices = PriceMemory::default();
            self.filters = FilterState::default();
            self.route = Some(route);
        }

        self.sequence += 1;
        self.params = Some(params);
        self.loading = true;
        self.error = None;

        Some(SearchTicket { sequence: self.sequence })
    }

    /// Applies the result of the fetch identified by `ticket`.
    ///
    /// Returns false, leaving the session untouched, when a newer search has
    /// been started since the ticket was issued.
    pub fn complete_search(&mut self, ticket: SearchTicket, outcome: SearchOutcome) -> bool {
        if ticket.sequence != self.sequence {
            debug!(
                "Discarding stale search response #{} (latest is #{})",
                ticket.sequence, self.sequence
            );
            return false;
        }

        self.loading = false;

        if let Some(message) = outcome.error {
            self.offers = Vec::new();
            self.error = Some(message);
            return true;
        }

        self.offers = outcome.offers;
        self.error = None;
        self.filters.duration =
            crate::aggregate::max_duration(&self.offers, self.settings.fallback_max_duration);

        if let Some(min) = min_price(&self.offers) {
            let min = min.round().max(0.0) as u64;
            if self.prices.stable_base.is_none() {
                self.prices.stable_base = Some(min);
            }
            if let Some(params) = &self.params {
                self.prices.cache.insert(params.depart_date, min);
            }
        }

        true
    }

    pub fn set_filters(&mut self, filters: FilterState) -> Result<(), SessionError> {
        filters.check().map_err(SessionError::InvalidFilter)?;
        self.filters = filters;
        Ok(())
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
    }

    pub fn view(&self) -> ResultsView {
        let stats = Aggregates::compute_with_fallback(&self.offers, self.settings.fallback_max_duration);
        let sorted = sort_by_price(apply_filters(&self.offers, &self.filters));
        let cheapest = cheapest_price(&sorted);

        let date_prices = match &self.params {
            Some(params) => {
                let base = self.prices.stable_base.unwrap_or(self.settings.default_base_price);
                let current = min_price(&self.offers)
                    .map(|p| p.round().max(0.0) as u64)
                    .unwrap_or(base);
                generate_date_prices(params.depart_date, base, current, &self.prices.cache)
            }
            None => Vec::new(),
        };

        ResultsView {
            params: self.params.clone(),
            total_count: self.offers.len(),
            filtered_count: sorted.len(),
            offers: sorted.into_iter().cloned().collect(),
            cheapest_price: cheapest,
            max_duration: stats.max_duration,
            filter_counts: stats.counts,
            available_airlines: stats.available_airlines,
            date_prices,
            filters: self.filters.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{offer, timed_offer};
    use crate::gateway::SEARCH_FAILED_MESSAGE;
    use chrono::NaiveDate;
    use skyfare_core::CabinClass;

    fn params(day: u32) -> SearchParams {
        SearchParams {
            from: "DEL".to_string(),
            to: "AGR".to_string(),
            depart_date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            return_date: None,
            adults: 1,
            cabin_class: CabinClass::Economy,
        }
    }

    fn searched(session: &mut SearchSession, p: SearchParams, offers: Vec<FlightOffer>) {
        let ticket = session.begin_search(p).expect("expected a fetch");
        assert!(session.complete_search(ticket, SearchOutcome::offers(offers)));
    }

    #[test]
    fn test_empty_results_scenario() {
        let mut session = SearchSession::default();
        searched(&mut session, params(15), Vec::new());

        let view = session.view();
        assert!(view.offers.is_empty());
        assert_eq!(view.cheapest_price, None);
        assert_eq!(view.max_duration, 1200);
        assert!(view.filter_counts.stops.is_empty());
        assert_eq!(view.date_prices.len(), 7);
        // nothing seen yet: the selected day shows the default base price
        assert_eq!(view.date_prices[3].price, 5000);
        assert!(session.stable_base_price().is_none());
    }

    #[test]
    fn test_basic_filter_scenario() {
        let mut session = SearchSession::default();
        searched(
            &mut session,
            params(15),
            vec![offer("a", "X", 0, 100.0), offer("b", "X", 1, 200.0), offer("c", "X", 2, 50.0)],
        );

        let unfiltered = session.view();
        let ids: Vec<&str> = unfiltered.offers.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(unfiltered.cheapest_price, Some(50.0));

        let direct_only = FilterState { stops: [0].into(), ..session.filters().clone() };
        session.set_filters(direct_only).unwrap();
        let filtered = session.view();
        assert_eq!(filtered.offers.len(), 1);
        assert_eq!(filtered.offers[0].id, "a");
        assert_eq!(filtered.cheapest_price, Some(100.0));
        assert_eq!(filtered.total_count, 3);
        // counts describe the unfiltered population
        assert_eq!(filtered.filter_counts.stops.values().sum::<usize>(), 3);
    }

    #[test]
    fn test_unchanged_context_does_not_refetch() {
        let mut session = SearchSession::default();
        searched(&mut session, params(15), vec![offer("a", "X", 0, 100.0)]);
        assert!(session.begin_search(params(15)).is_none());
        assert!(session.begin_search(params(16)).is_some());
    }

    #[test]
    fn test_failed_search_can_be_retried() {
        let mut session = SearchSession::default();
        let ticket = session.begin_search(params(15)).unwrap();
        assert!(session.complete_search(ticket, SearchOutcome::failed(SEARCH_FAILED_MESSAGE)));

        let view = session.view();
        assert_eq!(view.error.as_deref(), Some(SEARCH_FAILED_MESSAGE));
        assert!(view.offers.is_empty());
        assert!(!view.loading);

        assert!(session.begin_search(params(15)).is_some());
        assert!(session.view().error.is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = SearchSession::default();
        let first = session.begin_search(params(15)).unwrap();
        let second = session.begin_search(params(16)).unwrap();

        assert!(session.complete_search(second, SearchOutcome::offers(vec![offer("new", "X", 0, 300.0)])));
        assert!(!session.complete_search(first, SearchOutcome::offers(vec![offer("old", "X", 0, 100.0)])));

        let view = session.view();
        assert_eq!(view.offers.len(), 1);
        assert_eq!(view.offers[0].id, "new");
        assert!(!session.price_cache().contains_key(&params(15).depart_date));
    }

    #[test]
    fn test_loading_until_latest_completes() {
        let mut session = SearchSession::default();
        let first = session.begin_search(params(15)).unwrap();
        let _second = session.begin_search(params(16)).unwrap();
        session.complete_search(first, SearchOutcome::offers(Vec::new()));
        assert!(session.is_loading());
    }

    #[test]
    fn test_duration_filter_opens_to_max_on_results() {
        let mut session = SearchSession::default();
        assert_eq!(session.filters().duration, 2000);
        searched(
            &mut session,
            params(15),
            vec![
                timed_offer("a", "X", 0, 1.0, "08:00", "2h 30m"),
                timed_offer("b", "X", 1, 2.0, "09:00", "7h 45m"),
            ],
        );
        assert_eq!(session.filters().duration, 465);

        session.reset_filters();
        assert_eq!(session.filters(), &FilterState::default());
    }

    #[test]
    fn test_stable_base_and_cache_across_date_navigation() {
        let mut session = SearchSession::default();
        searched(&mut session, params(15), vec![offer("a", "X", 0, 4800.0)]);
        assert_eq!(session.stable_base_price(), Some(4800));

        searched(&mut session, params(16), vec![offer("b", "X", 0, 6100.0), offer("c", "X", 0, 5900.4)]);
        // the base stays put while moving along the strip
        assert_eq!(session.stable_base_price(), Some(4800));
        assert_eq!(session.price_cache().len(), 2);

        let view = session.view();
        let selected = view.date_prices.iter().find(|e| e.full_date == params(16).depart_date).unwrap();
        assert_eq!(selected.price, 5900);
        let previous = view.date_prices.iter().find(|e| e.full_date == params(15).depart_date).unwrap();
        assert_eq!(previous.price, 4800);
    }

    #[test]
    fn test_route_change_resets_price_memory_and_filters() {
        let mut session = SearchSession::default();
        searched(&mut session, params(15), vec![offer("a", "IndiGo", 0, 4800.0)]);
        session
            .set_filters(FilterState { airlines: ["IndiGo".to_string()].into(), ..Default::default() })
            .unwrap();

        let mut elsewhere = params(15);
        elsewhere.to = "BOM".to_string();
        let ticket = session.begin_search(elsewhere).unwrap();

        assert!(session.stable_base_price().is_none());
        assert!(session.price_cache().is_empty());
        assert!(session.filters().airlines.is_empty());

        session.complete_search(ticket, SearchOutcome::offers(vec![offer("b", "Vistara", 0, 7000.0)]));
        assert_eq!(session.stable_base_price(), Some(7000));
    }

    #[test]
    fn test_passenger_change_is_a_new_route() {
        let mut session = SearchSession::default();
        searched(&mut session, params(15), vec![offer("a", "X", 0, 4800.0)]);
        let mut couple = params(15);
        couple.adults = 2;
        session.begin_search(couple).unwrap();
        assert!(session.price_cache().is_empty());
    }

    #[test]
    fn test_invalid_filters_rejected() {
        let mut session = SearchSession::default();
        let bad = FilterState { departure_time: [12, 6], ..Default::default() };
        assert!(matches!(session.set_filters(bad), Err(SessionError::InvalidFilter(_))));
        assert_eq!(session.filters(), &FilterState::default());
    }

    #[test]
    fn test_view_before_any_search() {
        let view = SearchSession::default().view();
        assert!(view.params.is_none());
        assert!(view.date_prices.is_empty());
        assert!(!view.loading);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let mut session = SearchSession::default();
        searched(&mut session, params(15), vec![offer("a", "X", 0, 4800.0)]);
        let json = serde_json::to_value(session.view()).unwrap();
        assert_eq!(json["cheapestPrice"], 4800.0);
        assert_eq!(json["datePrices"][3]["fullDate"], "2026-02-15");
        assert_eq!(json["filterCounts"]["stops"]["0"], 1);
        assert_eq!(json["params"]["departDate"], "2026-02-15");
    }
}
