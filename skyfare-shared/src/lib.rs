pub mod models;
pub mod secret;

pub use models::offer::{Airline, Carrier, Endpoint, FlightOffer, Layover, Leg, Segment};
pub use models::place::{Airport, Place};
pub use secret::Masked;
