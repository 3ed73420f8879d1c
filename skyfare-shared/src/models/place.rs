use serde::{Deserialize, Serialize};

/// Raw place suggestion from the upstream typeahead endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub iata_code: String,
    pub name: String,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}

/// Airport as shown in the search form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub city: String,
    pub name: String,
    pub country: String,
}

impl From<Place> for Airport {
    fn from(place: Place) -> Self {
        Self {
            code: place.iata_code,
            city: place.city_name.unwrap_or_else(|| place.name.clone()),
            name: place.name,
            country: place.country_name.unwrap_or_default(),
        }
    }
}

impl Airport {
    /// "City (CODE)" label used by the search form
    pub fn label(&self) -> String {
        format!("{} ({})", self.city, self.code)
    }
}
