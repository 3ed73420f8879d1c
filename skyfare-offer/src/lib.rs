pub mod filter;
pub mod aggregate;
pub mod ordering;
pub mod date_prices;
pub mod session;
pub mod gateway;
pub mod detail;
pub mod typeahead;

pub use filter::{apply_filters, FilterState};
pub use aggregate::{Aggregates, FilterCounts};
pub use date_prices::{generate_date_prices, DatePriceEntry, PriceCache};
pub use session::{ResultsView, SearchSession, SearchTicket, SessionError, SessionSettings};
pub use gateway::SearchOutcome;
pub use detail::{BookingPartner, OfferDetail};
pub use typeahead::{AirportTypeahead, Suggestions, TypeaheadConfig};
