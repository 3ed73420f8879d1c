//! Duffel wire models and their translation into `FlightOffer`.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use skyfare_catalog::CurrencyTable;
use skyfare_core::duration::{format_iso, format_minutes};
use skyfare_core::{SourceError, SourceResult};
use skyfare_shared::{Airline, Carrier, Endpoint, FlightOffer, Layover, Leg, Place, Segment};

#[derive(Debug, Deserialize)]
pub struct DuffelEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct DuffelOfferRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct DuffelOffer {
    pub id: String,
    pub total_amount: String,
    pub total_currency: String,
    pub owner: DuffelCarrier,
    pub slices: Vec<DuffelSlice>,
    #[serde(default)]
    pub total_emissions_kg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DuffelCarrier {
    pub name: String,
    #[serde(default)]
    pub iata_code: Option<String>,
    #[serde(default)]
    pub logo_symbol_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DuffelSlice {
    #[serde(default)]
    pub duration: Option<String>,
    pub segments: Vec<DuffelSegment>,
}

#[derive(Debug, Deserialize)]
pub struct DuffelSegment {
    pub origin: DuffelPlace,
    pub destination: DuffelPlace,
    pub departing_at: String,
    pub arriving_at: String,
    #[serde(default)]
    pub duration: Option<String>,
    pub marketing_carrier: DuffelCarrier,
    #[serde(default)]
    pub operating_carrier: Option<DuffelCarrier>,
    #[serde(default)]
    pub marketing_carrier_flight_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DuffelPlace {
    #[serde(default)]
    pub iata_code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub iata_country_code: Option<String>,
}

impl DuffelPlace {
    fn code(&self) -> String {
        self.iata_code.clone().unwrap_or_default()
    }

    fn display_city(&self) -> String {
        self.city_name.clone().unwrap_or_else(|| self.name.clone())
    }

    /// Typeahead record; places without an IATA code cannot be searched.
    pub fn into_place(self) -> Option<Place> {
        let iata_code = self.iata_code?;
        Some(Place {
            iata_code,
            name: self.name,
            city_name: self.city_name,
            country_name: self.country_name.or(self.iata_country_code),
        })
    }
}

/// Converts an upstream offer, normalizing its price into the display
/// currency when the rate table knows the source currency.
pub fn map_offer(offer: DuffelOffer, currencies: &CurrencyTable) -> SourceResult<FlightOffer> {
    let mut slices = offer.slices.into_iter();
    let outbound = slices
        .next()
        .ok_or_else(|| SourceError::Decode(format!("offer {} has no slices", offer.id)))
        .and_then(map_slice)?;
    let inbound = slices.next().map(map_slice).transpose()?;

    let amount = offer
        .total_amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a >= 0.0)
        .ok_or_else(|| {
            SourceError::Decode(format!("offer {} has amount {:?}", offer.id, offer.total_amount))
        })?;

    let (price, currency) = if currencies.is_known(&offer.total_currency) {
        (
            currencies.convert(amount, &offer.total_currency),
            currencies.default_currency().to_string(),
        )
    } else {
        (currencies.convert(amount, &offer.total_currency), offer.total_currency)
    };

    Ok(FlightOffer {
        id: offer.id,
        airline: map_carrier(offer.owner),
        outbound,
        inbound,
        price,
        currency,
        emissions: offer.total_emissions_kg.map(|kg| format!("{} kg CO2e", kg)),
    })
}

fn map_carrier(carrier: DuffelCarrier) -> Airline {
    Airline {
        name: carrier.name,
        code: carrier.iata_code.unwrap_or_default(),
        logo: carrier.logo_symbol_url,
    }
}

fn map_slice(slice: DuffelSlice) -> SourceResult<Segment> {
    let (first, last) = match (slice.segments.first(), slice.segments.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(SourceError::Decode("slice has no segments".to_string())),
    };

    let departure = Endpoint {
        time: clock_time(&first.departing_at),
        airport: first.origin.code(),
        city: Some(first.origin.display_city()),
    };
    let arrival = Endpoint {
        time: clock_time(&last.arriving_at),
        airport: last.destination.code(),
        city: Some(last.destination.display_city()),
    };

    let layover = match slice.segments.as_slice() {
        [inbound_leg, onward, ..] => Some(Layover {
            airport: inbound_leg.destination.code(),
            duration: connection_time(&inbound_leg.arriving_at, &onward.departing_at)
                .map(format_minutes)
                .unwrap_or_default(),
        }),
        _ => None,
    };

    let stops = (slice.segments.len() - 1) as u32;
    let duration = slice.duration.as_deref().map(format_iso).unwrap_or_default();
    let legs = slice.segments.into_iter().map(map_leg).collect();

    Ok(Segment {
        departure,
        arrival,
        duration,
        stops,
        layover,
        segments: Some(legs),
    })
}

fn map_leg(segment: DuffelSegment) -> Leg {
    let flight_number = format!(
        "{}{}",
        segment.marketing_carrier.iata_code.as_deref().unwrap_or_default(),
        segment.marketing_carrier_flight_number.as_deref().unwrap_or_default()
    );
    Leg {
        departure: Endpoint {
            time: clock_time(&segment.departing_at),
            airport: segment.origin.code(),
            city: Some(segment.origin.display_city()),
        },
        arrival: Endpoint {
            time: clock_time(&segment.arriving_at),
            airport: segment.destination.code(),
            city: Some(segment.destination.display_city()),
        },
        duration: segment.duration.as_deref().map(format_iso).unwrap_or_default(),
        operating_carrier: segment.operating_carrier.map(|c| Carrier {
            name: c.name,
            code: c.iata_code.unwrap_or_default(),
        }),
        marketing_carrier: map_carrier(segment.marketing_carrier),
        flight_number,
    }
}

/// Local timestamps come without an offset ("2026-02-15T10:25:00").
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
}

/// "HH:MM" of a local timestamp; empty when it cannot be read.
fn clock_time(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

fn connection_time(arrived: &str, departs: &str) -> Option<u32> {
    let gap = parse_timestamp(departs)? - parse_timestamp(arrived)?;
    u32::try_from(gap.num_minutes()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFER: &str = r#"{
        "id": "off_0000AEdGRhtp5AUUdJqMxo",
        "total_amount": "54.20",
        "total_currency": "USD",
        "total_emissions_kg": "95",
        "owner": {"name": "IndiGo", "iata_code": "6E", "logo_symbol_url": "https://assets.duffel.com/6E.svg"},
        "slices": [{
            "duration": "PT6H05M",
            "segments": [
                {
                    "origin": {"iata_code": "DEL", "name": "Indira Gandhi International Airport", "city_name": "Delhi"},
                    "destination": {"iata_code": "BOM", "name": "Chhatrapati Shivaji Maharaj", "city_name": "Mumbai"},
                    "departing_at": "2026-02-15T06:10:00",
                    "arriving_at": "2026-02-15T08:25:00",
                    "duration": "PT2H15M",
                    "marketing_carrier": {"name": "IndiGo", "iata_code": "6E"},
                    "marketing_carrier_flight_number": "5021"
                },
                {
                    "origin": {"iata_code": "BOM", "name": "Chhatrapati Shivaji Maharaj", "city_name": "Mumbai"},
                    "destination": {"iata_code": "GOI", "name": "Goa International Airport"},
                    "departing_at": "2026-02-15T10:40:00",
                    "arriving_at": "2026-02-15T12:15:00",
                    "duration": "PT1H35M",
                    "marketing_carrier": {"name": "IndiGo", "iata_code": "6E"},
                    "operating_carrier": {"name": "Air India", "iata_code": "AI"},
                    "marketing_carrier_flight_number": "337"
                }
            ]
        }]
    }"#;

    fn parse() -> DuffelOffer {
        serde_json::from_str(OFFER).expect("Failed to deserialize offer")
    }

    #[test]
    fn test_maps_connecting_one_way_offer() {
        let offer = map_offer(parse(), &CurrencyTable::default()).unwrap();

        assert_eq!(offer.airline.code, "6E");
        assert_eq!(offer.price, 4661.0);
        assert_eq!(offer.currency, "INR");
        assert!(offer.inbound.is_none());
        assert_eq!(offer.emissions.as_deref(), Some("95 kg CO2e"));

        let out = &offer.outbound;
        assert_eq!(out.departure.time, "06:10");
        assert_eq!(out.departure.city.as_deref(), Some("Delhi"));
        assert_eq!(out.arrival.time, "12:15");
        assert_eq!(out.arrival.city.as_deref(), Some("Goa International Airport"));
        assert_eq!(out.duration, "6h 5m");
        assert_eq!(out.stops, 1);
        assert!(out.is_consistent());

        let layover = out.layover.as_ref().unwrap();
        assert_eq!(layover.airport, "BOM");
        assert_eq!(layover.duration, "2h 15m");

        let legs = out.segments.as_ref().unwrap();
        assert_eq!(legs[1].flight_number, "6E337");
        assert_eq!(legs[1].operating_carrier.as_ref().unwrap().code, "AI");
    }

    #[test]
    fn test_unknown_currency_is_kept() {
        let mut raw = parse();
        raw.total_currency = "THB".to_string();
        let offer = map_offer(raw, &CurrencyTable::default()).unwrap();
        assert_eq!(offer.price, 54.2);
        assert_eq!(offer.currency, "THB");
    }

    #[test]
    fn test_bad_amount_is_rejected() {
        let mut raw = parse();
        raw.total_amount = "n/a".to_string();
        assert!(matches!(map_offer(raw, &CurrencyTable::default()), Err(SourceError::Decode(_))));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let mut raw = parse();
        raw.total_amount = "-54.20".to_string();
        assert!(matches!(map_offer(raw, &CurrencyTable::default()), Err(SourceError::Decode(_))));

        let mut raw = parse();
        raw.total_amount = "NaN".to_string();
        assert!(map_offer(raw, &CurrencyTable::default()).is_err());
    }

    #[test]
    fn test_offer_without_slices_is_rejected() {
        let mut raw = parse();
        raw.slices.clear();
        assert!(map_offer(raw, &CurrencyTable::default()).is_err());
    }

    #[test]
    fn test_place_needs_iata_code() {
        let city: DuffelPlace = serde_json::from_str(r#"{"name": "London", "iata_country_code": "GB"}"#).unwrap();
        assert!(city.into_place().is_none());

        let airport: DuffelPlace = serde_json::from_str(
            r#"{"iata_code": "LHR", "name": "Heathrow Airport", "city_name": "London", "iata_country_code": "GB"}"#,
        )
        .unwrap();
        let place = airport.into_place().unwrap();
        assert_eq!(place.country_name.as_deref(), Some("GB"));
    }

    #[test]
    fn test_clock_time() {
        assert_eq!(clock_time("2026-02-15T23:05:00"), "23:05");
        assert_eq!(clock_time("2026-02-15T23:05:00+05:30"), "23:05");
        assert_eq!(clock_time("tomorrow"), "");
    }
}
