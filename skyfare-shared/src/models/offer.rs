use serde::{Deserialize, Serialize};

/// Airline that owns (sells) an offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Operating carrier of a sub-leg, when it differs from the marketing one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub name: String,
    pub code: String,
}

/// One end of a segment or leg: local time of day plus the airport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Display time, "HH:MM"
    pub time: String,
    pub airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// First connection of a multi-hop segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layover {
    pub airport: String,
    pub duration: String,
}

/// A single flight inside a segment, used by the itinerary detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub duration: String,
    pub marketing_carrier: Airline,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_carrier: Option<Carrier>,
    pub flight_number: String,
}

/// One directional leg of a trip, possibly composed of several flights.
///
/// When `segments` is present, `stops == segments.len() - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub departure: Endpoint,
    pub arrival: Endpoint,
    /// Display duration such as "2h 30m"
    pub duration: String,
    pub stops: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layover: Option<Layover>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Leg>>,
}

impl Segment {
    /// Whether the stop count agrees with the detailed legs, if any.
    pub fn is_consistent(&self) -> bool {
        match &self.segments {
            Some(legs) => !legs.is_empty() && self.stops as usize == legs.len() - 1,
            None => true,
        }
    }
}

/// One priced itinerary returned by the upstream source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: String,
    pub airline: Airline,
    pub outbound: Segment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound: Option<Segment>,
    pub price: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissions: Option<String>,
}
