// src/error.rs
use std::io;

use thiserror::Error;

/// Errors surfaced by the place matching library.
///
/// Everything here is fatal for the run: callers fix the input or the
/// configuration and start again.
#[derive(Debug, Error)]
pub enum PlaceMatchError {
    #[error("required column '{0}' is missing from the input")]
    MissingColumn(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("transliteration backend '{backend}' is unavailable: {reason}")]
    TransliteratorUnavailable { backend: String, reason: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure to transliterate a single field. Recovered by the caller; never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("could not transliterate '{text}': {reason}")]
pub struct TransliterationError {
    pub text: String,
    pub reason: String,
}
