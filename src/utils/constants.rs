// src/utils/constants.rs

/// Default sorted-neighbourhood window for both blocking passes.
pub const DEFAULT_BLOCKING_WINDOW: usize = 3;

/// Candidate sets larger than this are scored in chunks.
pub const DEFAULT_CHUNK_THRESHOLD: usize = 10_000;

/// Number of chunks used once the threshold is exceeded.
pub const DEFAULT_CHUNK_COUNT: usize = 30;

/// Country code whose records get romanized. Compared case-insensitively.
pub const JAPAN_COUNTRY_CODE: &str = "jp";

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;
