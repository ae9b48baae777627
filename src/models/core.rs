// src/models/core.rs
use serde::{Deserialize, Serialize};

/// Columns the upstream loader must supply.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "name",
    "address",
    "city",
    "state",
    "country",
    "categories",
    "latitude",
    "longitude",
];

/// One raw place row as it arrives from the loader. Text fields may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub categories: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            latitude,
            longitude,
            ..Default::default()
        }
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    pub fn with_city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    pub fn with_categories(mut self, categories: &str) -> Self {
        self.categories = Some(categories.to_string());
        self
    }
}

/// A place after text normalization.
///
/// `name`, `city` and `country` are lowercase and never missing; `name_loc` is always
/// `"{name} {city} {country}"`. `address` and `categories` are lowercased when present
/// and `state` is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlace {
    pub id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub categories: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub name_loc: String,
}

/// Input dataset. The row position is the record identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceTable {
    pub places: Vec<Place>,
}

impl PlaceTable {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl FromIterator<Place> for PlaceTable {
    fn from_iter<I: IntoIterator<Item = Place>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Output of the normalizer; input to transliteration, blocking and scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    pub places: Vec<NormalizedPlace>,
}

impl NormalizedTable {
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
