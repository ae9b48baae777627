// src/preprocessing/transliteration.rs
//! Romanization of Japanese text fields.
//!
//! Records flagged with the configured country code get `name`, `address`, `city`
//! and `state` converted from Hiragana, Katakana and Kanji to romaji. Conversion is
//! best effort: a field that cannot be converted keeps its original value and is
//! counted in the [`TransliterationReport`].

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PlaceMatchError, TransliterationError};
use crate::models::core::{NormalizedPlace, NormalizedTable};
use crate::preprocessing::normalization::build_name_loc;

static JAPANESE_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{Hiragana}\p{Katakana}\p{Han}]").expect("script class pattern is valid")
});

const PROBE_TEXT: &str = "すし カタカナ 東京";

/// True if the text still holds Hiragana, Katakana or Kanji characters.
pub fn contains_japanese_script(text: &str) -> bool {
    JAPANESE_SCRIPT.is_match(text)
}

pub trait Transliterator {
    fn name(&self) -> &'static str;
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError>;
}

/// Romaji conversion backed by the `kakasi` dictionary.
#[derive(Debug)]
pub struct KakasiTransliterator {
    _private: (),
}

impl KakasiTransliterator {
    /// Build the backend and make sure it actually romanizes before any data goes through it.
    pub fn new() -> Result<Self, PlaceMatchError> {
        let backend = Self { _private: () };
        verify_transliterator(&backend)?;
        Ok(backend)
    }
}

impl Transliterator for KakasiTransliterator {
    fn name(&self) -> &'static str {
        "kakasi"
    }

    fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
        Ok(kakasi::convert(text).romaji)
    }
}

/// Startup capability check: a backend that leaves convertible script behind is a
/// configuration error, not something to discover record by record.
pub fn verify_transliterator(backend: &dyn Transliterator) -> Result<(), PlaceMatchError> {
    let unavailable = |reason: String| PlaceMatchError::TransliteratorUnavailable {
        backend: backend.name().to_string(),
        reason,
    };
    let converted = backend
        .transliterate(PROBE_TEXT)
        .map_err(|e| unavailable(e.to_string()))?;
    if contains_japanese_script(&converted) {
        return Err(unavailable(format!(
            "probe '{}' came back as '{}'",
            PROBE_TEXT, converted
        )));
    }
    debug!("Transliterator '{}' passed probe: '{}'", backend.name(), converted);
    Ok(())
}

/// Outcome for one field of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConversion {
    Converted(String),
    /// Field had no value to convert.
    Missing,
    /// Backend refused the value; the original is kept.
    Failed(TransliterationError),
}

impl FieldConversion {
    fn apply_to(self, original: &str) -> String {
        match self {
            FieldConversion::Converted(value) => value,
            FieldConversion::Missing | FieldConversion::Failed(_) => original.to_string(),
        }
    }

    fn apply_to_optional(self, original: Option<&str>) -> Option<String> {
        match self {
            FieldConversion::Converted(value) => Some(value),
            FieldConversion::Missing | FieldConversion::Failed(_) => original.map(str::to_string),
        }
    }
}

pub fn transliterate_field(value: Option<&str>, backend: &dyn Transliterator) -> FieldConversion {
    match value {
        None => FieldConversion::Missing,
        Some(text) => match backend.transliterate(text) {
            Ok(converted) => FieldConversion::Converted(converted),
            Err(e) => FieldConversion::Failed(e),
        },
    }
}

/// Diagnostic counts for one transliteration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransliterationReport {
    pub records_flagged: usize,
    pub fields_converted: usize,
    pub fields_missing: usize,
    pub fields_failed: usize,
}

impl TransliterationReport {
    fn record(&mut self, outcome: &FieldConversion) {
        match outcome {
            FieldConversion::Converted(_) => self.fields_converted += 1,
            FieldConversion::Missing => self.fields_missing += 1,
            FieldConversion::Failed(_) => self.fields_failed += 1,
        }
    }

    pub fn fields_unchanged(&self) -> usize {
        self.fields_missing + self.fields_failed
    }
}

fn is_flagged(place: &NormalizedPlace, country_code: &str) -> bool {
    place.country.eq_ignore_ascii_case(country_code)
}

fn convert_place(
    place: &NormalizedPlace,
    backend: &dyn Transliterator,
    report: &mut TransliterationReport,
) -> NormalizedPlace {
    let name = transliterate_field(Some(place.name.as_str()), backend);
    let address = transliterate_field(place.address.as_deref(), backend);
    let city = transliterate_field(Some(place.city.as_str()), backend);
    let state = transliterate_field(place.state.as_deref(), backend);
    for outcome in [&name, &address, &city, &state] {
        report.record(outcome);
    }

    // name and city stay lowercase so name_loc keeps matching the normalizer's output
    let name = name.apply_to(&place.name).to_lowercase();
    let city = city.apply_to(&place.city).to_lowercase();
    let name_loc = build_name_loc(&name, &city, &place.country);

    NormalizedPlace {
        name,
        address: address.apply_to_optional(place.address.as_deref()),
        city,
        state: state.apply_to_optional(place.state.as_deref()),
        name_loc,
        ..place.clone()
    }
}

/// Romanize every record whose country matches `country_code`. Other records are copied as-is.
pub fn convert_japanese_places(
    table: &NormalizedTable,
    backend: &dyn Transliterator,
    country_code: &str,
) -> (NormalizedTable, TransliterationReport) {
    let mut report = TransliterationReport::default();
    let places = table
        .places
        .iter()
        .map(|place| {
            if is_flagged(place, country_code) {
                report.records_flagged += 1;
                convert_place(place, backend, &mut report)
            } else {
                place.clone()
            }
        })
        .collect();
    (NormalizedTable { places }, report)
}
