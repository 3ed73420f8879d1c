use serde::Serialize;
use skyfare_catalog::{city_name, format_price, redirect_url};
use skyfare_shared::{FlightOffer, Segment};

/// One place the traveller can book the offer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPartner {
    pub name: String,
    pub rating: f32,
    pub reviews: u32,
    pub features: Vec<String>,
    pub price: u64,
    pub price_display: String,
    pub is_airline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    pub redirect_url: String,
}

/// Everything the flight detail page renders for one offer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetail {
    pub offer: FlightOffer,
    pub stops_label: String,
    pub stop_airports: Vec<String>,
    pub destination_city: String,
    pub price_display: String,
    pub partners: Vec<BookingPartner>,
}

impl OfferDetail {
    pub fn from_offer(offer: FlightOffer) -> Self {
        let arrival = &offer.outbound.arrival;
        let destination_city = arrival
            .city
            .clone()
            .unwrap_or_else(|| city_name(&arrival.airport).to_string());

        Self {
            stops_label: stops_label(offer.outbound.stops),
            stop_airports: stop_airports(&offer.outbound),
            destination_city,
            price_display: format_price(offer.price, &offer.currency),
            partners: booking_partners(&offer),
            offer,
        }
    }
}

/// "Direct", "1 stop", "3 stops"
pub fn stops_label(stops: u32) -> String {
    match stops {
        0 => "Direct".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{} stops", n),
    }
}

/// Connection airports: where every leg but the last one lands.
pub fn stop_airports(segment: &Segment) -> Vec<String> {
    match &segment.segments {
        Some(legs) if legs.len() > 1 => legs[..legs.len() - 1]
            .iter()
            .map(|leg| leg.arrival.airport.clone())
            .collect(),
        _ => Vec::new(),
    }
}

struct PartnerTemplate<'a> {
    name: &'a str,
    rating: f32,
    reviews: u32,
    features: &'a [&'a str],
    markup: f64,
    is_airline: bool,
    discount: Option<&'a str>,
}

impl PartnerTemplate<'_> {
    fn quote(&self, offer: &FlightOffer) -> BookingPartner {
        let price = (offer.price * self.markup).round().max(0.0) as u64;
        BookingPartner {
            name: self.name.to_string(),
            rating: self.rating,
            reviews: self.reviews,
            features: self.features.iter().map(|f| f.to_string()).collect(),
            price,
            price_display: format_price(price as f64, &offer.currency),
            is_airline: self.is_airline,
            discount: self.discount.map(str::to_string),
            redirect_url: redirect_url(&offer.airline.code, self.name),
        }
    }
}

/// Partner list with the airline priced slightly above the agencies.
pub fn booking_partners(offer: &FlightOffer) -> Vec<BookingPartner> {
    let templates = [
        PartnerTemplate {
            name: "MakeMyTrip",
            rating: 4.6,
            reviews: 28017,
            features: &["24/7 customer support", "Extra discounts on international flights with code MMTSKYSUPER"],
            markup: 1.0,
            is_airline: false,
            discount: Some("MMTSKYSUPER"),
        },
        PartnerTemplate {
            name: "Goibibo",
            rating: 4.6,
            reviews: 52594,
            features: &["24/7 customer support", "Flat 10% off domestic flights with code GISKYSUPER"],
            markup: 1.0,
            is_airline: false,
            discount: Some("GISKYSUPER"),
        },
        PartnerTemplate {
            name: &offer.airline.name,
            rating: 4.9,
            reviews: 908,
            features: &[],
            markup: 1.01,
            is_airline: true,
            discount: None,
        },
        PartnerTemplate {
            name: "Trip.com",
            rating: 4.9,
            reviews: 3898,
            features: &["24/7 live chat and telephone support"],
            markup: 1.08,
            is_airline: false,
            discount: None,
        },
    ];

    templates.iter().map(|t| t.quote(offer)).collect()
}
