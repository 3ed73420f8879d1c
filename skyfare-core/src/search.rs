use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::PremiumEconomy => "premium_economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }
}

/// Everything that determines an upstream search.
///
/// Two equal params never need a second fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub from: String,
    pub to: String,
    pub depart_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub cabin_class: CabinClass,
}

fn default_adults() -> u32 { 1 }

/// The part of a search that scopes the price cache: dates are left out so
/// that moving along the date strip keeps previously seen prices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub from: String,
    pub to: String,
    pub cabin_class: CabinClass,
    pub adults: u32,
}

impl SearchParams {
    pub fn route_key(&self) -> RouteKey {
        RouteKey {
            from: self.from.clone(),
            to: self.to.clone(),
            cabin_class: self.cabin_class,
            adults: self.adults,
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !is_iata(&self.from) || !is_iata(&self.to) {
            return Err(CoreError::ValidationError(format!(
                "origin and destination must be 3-letter IATA codes, got {:?} -> {:?}",
                self.from, self.to
            )));
        }
        if self.from.eq_ignore_ascii_case(&self.to) {
            return Err(CoreError::ValidationError("origin equals destination".to_string()));
        }
        if self.adults == 0 {
            return Err(CoreError::ValidationError("at least one adult is required".to_string()));
        }
        if let Some(ret) = self.return_date {
            if ret < self.depart_date {
                return Err(CoreError::ValidationError(format!(
                    "return date {} is before departure {}",
                    ret, self.depart_date
                )));
            }
        }
        Ok(())
    }
}

fn is_iata(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}
