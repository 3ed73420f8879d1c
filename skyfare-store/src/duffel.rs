use crate::app_config::DuffelConfig;
use crate::mapping::{map_offer, DuffelEnvelope, DuffelOffer, DuffelOfferRequest, DuffelPlace};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use skyfare_catalog::CurrencyTable;
use skyfare_core::{OfferSource, SearchParams, SourceError, SourceResult};
use skyfare_shared::{FlightOffer, Place};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Offer source backed by the Duffel flights API.
#[derive(Clone)]
pub struct DuffelClient {
    http: reqwest::Client,
    base_url: String,
    offer_limit: u32,
    currencies: CurrencyTable,
}

#[derive(Debug, Serialize)]
struct OfferRequestBody<'a> {
    data: OfferRequestData<'a>,
}

#[derive(Debug, Serialize)]
struct OfferRequestData<'a> {
    slices: Vec<SliceRequest<'a>>,
    passengers: Vec<PassengerRequest>,
    cabin_class: &'a str,
}

#[derive(Debug, Serialize)]
struct SliceRequest<'a> {
    origin: &'a str,
    destination: &'a str,
    departure_date: String,
}

#[derive(Debug, Serialize)]
struct PassengerRequest {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> OfferRequestBody<'a> {
    fn from_params(params: &'a SearchParams) -> Self {
        let mut slices = vec![SliceRequest {
            origin: &params.from,
            destination: &params.to,
            departure_date: params.depart_date.format("%Y-%m-%d").to_string(),
        }];
        if let Some(back) = params.return_date {
            slices.push(SliceRequest {
                origin: &params.to,
                destination: &params.from,
                departure_date: back.format("%Y-%m-%d").to_string(),
            });
        }

        Self {
            data: OfferRequestData {
                slices,
                passengers: (0..params.adults).map(|_| PassengerRequest { kind: "adult" }).collect(),
                cabin_class: params.cabin_class.as_str(),
            },
        }
    }
}

impl DuffelClient {
    pub fn new(config: &DuffelConfig, currencies: CurrencyTable) -> SourceResult<Self> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.access_token.expose()))
            .map_err(|_| SourceError::Transport("access token is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let version = HeaderValue::from_str(&config.api_version)
            .map_err(|_| SourceError::Transport(format!("invalid API version {:?}", config.api_version)))?;
        headers.insert(HeaderName::from_static("duffel-version"), version);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            offer_limit: config.offer_limit,
            currencies,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> SourceResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        let response = self.http.get(&url).query(query).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> SourceResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        let response = self.http.post(&url).json(body).send().await.map_err(transport)?;
        decode(response).await
    }

    fn map_offers(&self, raw: Vec<DuffelOffer>) -> Vec<FlightOffer> {
        raw.into_iter()
            .filter_map(|offer| {
                let id = offer.id.clone();
                match map_offer(offer, &self.currencies) {
                    Ok(mapped) => Some(mapped),
                    Err(e) => {
                        warn!("Skipping offer {}: {}", id, e);
                        None
                    }
                }
            })
            .collect()
    }
}

fn transport(e: reqwest::Error) -> SourceError {
    SourceError::Transport(e.to_string())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> SourceResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(SourceError::Status { status: status.as_u16(), message });
    }
    response.json::<T>().await.map_err(|e| SourceError::Decode(e.to_string()))
}

#[async_trait]
impl OfferSource for DuffelClient {
    async fn search_places(&self, query: &str) -> SourceResult<Vec<Place>> {
        let envelope: DuffelEnvelope<Vec<DuffelPlace>> = self
            .get_json("/places/suggestions", &[("query", query.to_string())])
            .await?;
        Ok(envelope.data.into_iter().filter_map(DuffelPlace::into_place).collect())
    }

    async fn search_offers(&self, params: &SearchParams) -> SourceResult<Vec<FlightOffer>> {
        let body = OfferRequestBody::from_params(params);
        let request: DuffelEnvelope<DuffelOfferRequest> = self
            .post_json("/air/offer_requests?return_offers=false", &body)
            .await?;
        info!("Created offer request {} for {} -> {}", request.data.id, params.from, params.to);

        let offers: DuffelEnvelope<Vec<DuffelOffer>> = self
            .get_json(
                "/air/offers",
                &[
                    ("offer_request_id", request.data.id),
                    ("sort", "total_amount".to_string()),
                    ("limit", self.offer_limit.to_string()),
                ],
            )
            .await?;
        Ok(self.map_offers(offers.data))
    }

    async fn get_offer(&self, id: &str) -> SourceResult<Option<FlightOffer>> {
        let path = format!("/air/offers/{}", id);
        match self.get_json::<DuffelEnvelope<DuffelOffer>>(&path, &[]).await {
            Ok(envelope) => map_offer(envelope.data, &self.currencies).map(Some),
            Err(SourceError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use skyfare_core::CabinClass;

    fn params(return_date: Option<NaiveDate>) -> SearchParams {
        SearchParams {
            from: "DEL".to_string(),
            to: "GOI".to_string(),
            depart_date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            return_date,
            adults: 2,
            cabin_class: CabinClass::PremiumEconomy,
        }
    }

    #[test]
    fn test_one_way_request_body() {
        let params = params(None);
        let body = serde_json::to_value(OfferRequestBody::from_params(&params)).unwrap();

        assert_eq!(body["data"]["cabin_class"], "premium_economy");
        assert_eq!(body["data"]["slices"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["slices"][0]["departure_date"], "2026-02-15");
        assert_eq!(body["data"]["passengers"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["passengers"][0]["type"], "adult");
    }

    #[test]
    fn test_round_trip_request_reverses_route() {
        let params = params(NaiveDate::from_ymd_opt(2026, 2, 20));
        let body = serde_json::to_value(OfferRequestBody::from_params(&params)).unwrap();

        let back = &body["data"]["slices"][1];
        assert_eq!(back["origin"], "GOI");
        assert_eq!(back["destination"], "DEL");
        assert_eq!(back["departure_date"], "2026-02-20");
    }

    #[test]
    fn test_client_rejects_unprintable_token() {
        let config = DuffelConfig {
            base_url: "https://api.duffel.com/".to_string(),
            access_token: skyfare_shared::Masked("bad\ntoken".to_string()),
            api_version: "v2".to_string(),
            offer_limit: 20,
            timeout_seconds: 5,
        };
        assert!(DuffelClient::new(&config, CurrencyTable::default()).is_err());
    }
}
