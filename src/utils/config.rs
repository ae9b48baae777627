// src/utils/config.rs
//! Run configuration assembled from environment variables.
//!
//! Numeric settings fall back to their defaults when unset or unparsable. Method
//! names must be recognised, and window sizes are checked by [`PipelineConfig::validate`].

use log::info;
use std::env;

use crate::candidate_generation::BlockingConfig;
use crate::error::PlaceMatchError;
use crate::matching::compare::{NumericComparison, NumericMethod, StringMethod};
use crate::matching::scoring::ScoringConfig;
use crate::utils::constants::{
    DEFAULT_BLOCKING_WINDOW, DEFAULT_CHUNK_COUNT, DEFAULT_CHUNK_THRESHOLD, JAPAN_COUNTRY_CODE,
};
use crate::utils::env::parse_var;
use crate::utils::progress_bars::progress_config::ProgressConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub blocking: BlockingConfig,
    pub scoring: ScoringConfig,
    pub transliteration_enabled: bool,
    /// Records whose country equals this code (ignoring case) are romanized.
    pub country_code: String,
    pub progress: ProgressConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            blocking: BlockingConfig::default(),
            scoring: ScoringConfig::default(),
            transliteration_enabled: true,
            country_code: JAPAN_COUNTRY_CODE.to_string(),
            progress: ProgressConfig::default(),
        }
    }
}

fn parse_method<T>(key: &str, default: T) -> Result<T, PlaceMatchError>
where
    T: std::str::FromStr<Err = PlaceMatchError>,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.parse(),
        _ => Ok(default),
    }
}

impl PipelineConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, PlaceMatchError> {
        let progress = ProgressConfig::from_env();
        let numeric = NumericComparison {
            method: parse_method("SCORING_NUMERIC_METHOD", NumericMethod::default())?,
            scale: parse_var("SCORING_NUMERIC_SCALE", 1.0),
            offset: parse_var("SCORING_NUMERIC_OFFSET", 0.0),
        };
        let scoring = ScoringConfig {
            string_method: parse_method("SCORING_STRING_METHOD", StringMethod::default())?,
            numeric,
            missing_value: parse_var("SCORING_MISSING_VALUE", 0.0),
            chunk_threshold: parse_var("SCORING_CHUNK_THRESHOLD", DEFAULT_CHUNK_THRESHOLD),
            chunk_count: parse_var("SCORING_CHUNK_COUNT", DEFAULT_CHUNK_COUNT),
            log_memory: progress.should_show_memory(),
        };
        let config = Self {
            blocking: BlockingConfig {
                lat_win: parse_var("BLOCKING_LAT_WINDOW", DEFAULT_BLOCKING_WINDOW),
                name_win: parse_var("BLOCKING_NAME_WINDOW", DEFAULT_BLOCKING_WINDOW),
            },
            scoring,
            transliteration_enabled: parse_var("TRANSLITERATION_ENABLED", true),
            country_code: env::var("TRANSLITERATION_COUNTRY_CODE")
                .ok()
                .map(|code| code.trim().to_lowercase())
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| JAPAN_COUNTRY_CODE.to_string()),
            progress,
        };
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PlaceMatchError> {
        self.blocking.validate()?;
        self.scoring.validate()?;
        if self.transliteration_enabled && self.country_code.is_empty() {
            return Err(PlaceMatchError::Configuration(
                "transliteration country code must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn log_config(&self) {
        info!("🔧 Pipeline configuration:");
        info!(
            "   • Blocking windows: latitude={}, name/location={}",
            self.blocking.lat_win, self.blocking.name_win
        );
        info!(
            "   • Scoring: strings={}, numbers={} (scale={}, offset={}), missing={}",
            self.scoring.string_method.as_str(),
            self.scoring.numeric.method.as_str(),
            self.scoring.numeric.scale,
            self.scoring.numeric.offset,
            self.scoring.missing_value
        );
        info!(
            "   • Chunking: {} chunks above {} pairs",
            self.scoring.chunk_count, self.scoring.chunk_threshold
        );
        if self.transliteration_enabled {
            info!("   • Transliteration enabled for country '{}'", self.country_code);
        } else {
            info!("   • Transliteration disabled");
        }
    }
}
