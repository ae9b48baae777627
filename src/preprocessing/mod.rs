pub mod normalization;
pub mod transliteration;

pub use normalization::{build_name_loc, normalize_place, normalize_places};
pub use transliteration::{
    contains_japanese_script, convert_japanese_places, verify_transliterator, FieldConversion,
    KakasiTransliterator, TransliterationReport, Transliterator,
};
