// src/preprocessing/normalization.rs
use crate::models::core::{NormalizedPlace, NormalizedTable, Place, PlaceTable};

/// Composite blocking key: normalized name, city and country joined by single spaces.
/// No trimming, so empty parts leave their separators behind.
pub fn build_name_loc(name: &str, city: &str, country: &str) -> String {
    format!("{} {} {}", name, city, country)
}

/// Lowercase text fields and fill the ones blocking relies on.
///
/// `name`, `city` and `country` become empty strings when missing. `address` and
/// `categories` are lowercased but stay missing if they were. `state` is untouched.
pub fn normalize_place(place: &Place) -> NormalizedPlace {
    let name = place.name.as_deref().unwrap_or_default().to_lowercase();
    let city = place.city.as_deref().unwrap_or_default().to_lowercase();
    let country = place.country.as_deref().unwrap_or_default().to_lowercase();
    let name_loc = build_name_loc(&name, &city, &country);

    NormalizedPlace {
        id: place.id.clone(),
        name,
        address: place.address.as_deref().map(str::to_lowercase),
        city,
        state: place.state.clone(),
        country,
        categories: place.categories.as_deref().map(str::to_lowercase),
        latitude: place.latitude,
        longitude: place.longitude,
        name_loc,
    }
}

/// Normalize every record. The input table is left as it was.
pub fn normalize_places(table: &PlaceTable) -> NormalizedTable {
    NormalizedTable {
        places: table.places.iter().map(normalize_place).collect(),
    }
}
