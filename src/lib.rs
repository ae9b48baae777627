pub mod candidate_generation;
pub mod clustering;
pub mod error;
pub mod matching;
pub mod models;
pub mod preprocessing;
pub mod utils;
pub mod visualization;

pub use error::{PlaceMatchError, TransliterationError};
