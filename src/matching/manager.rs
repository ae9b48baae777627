// src/matching/manager.rs - Runs the stages in order and collects run statistics
use chrono::Utc;
use indicatif::MultiProgress;
use log::info;
use std::time::Instant;
use uuid::Uuid;

use crate::error::PlaceMatchError;
use crate::matching::scoring::block_and_score;
use crate::models::core::{NormalizedTable, PlaceTable};
use crate::models::matching::ScoreTable;
use crate::models::stats_models::PipelineStats;
use crate::preprocessing::normalization::normalize_places;
use crate::preprocessing::transliteration::{
    convert_japanese_places, TransliterationReport, Transliterator,
};
use crate::utils::config::PipelineConfig;
use crate::utils::progress_bars::logging::{
    log_pipeline_completion, log_pipeline_start, PipelineStage, StageLogger,
};

pub struct PipelineOutput {
    pub normalized: NormalizedTable,
    pub report: TransliterationReport,
    /// One table, or one per chunk in chunk order.
    pub score_tables: Vec<ScoreTable>,
    pub stats: PipelineStats,
}

impl PipelineOutput {
    pub fn merged_scores(&self) -> ScoreTable {
        ScoreTable::concat(&self.score_tables)
    }
}

/// Normalize, optionally romanize, block and score.
///
/// Transliteration runs only when a backend is given; the caller decides that from
/// `config.transliteration_enabled`.
pub fn run_place_matching_pipeline(
    places: &PlaceTable,
    config: &PipelineConfig,
    transliterator: Option<&dyn Transliterator>,
    multi_progress: Option<MultiProgress>,
) -> Result<PipelineOutput, PlaceMatchError> {
    config.validate()?;
    let run_start = Instant::now();
    let run_id = Uuid::new_v4().to_string();
    let mut stats = PipelineStats::new(
        &run_id,
        Utc::now().naive_utc(),
        Some("Place deduplication candidate scoring"),
    );
    stats.total_records = places.len();
    log_pipeline_start(
        &run_id,
        places.len(),
        config.blocking.lat_win,
        config.blocking.name_win,
    );

    // Normalization
    let logger = StageLogger::new(PipelineStage::Normalization);
    logger.log_start(places.len());
    let normalized = normalize_places(places);
    logger.log_completion(normalized.len(), "records normalized");
    stats.normalization_time = logger.get_elapsed().as_secs_f64();

    // Transliteration
    let phase_start = Instant::now();
    let (normalized, report) = match transliterator {
        Some(backend) => {
            let logger = StageLogger::new(PipelineStage::Transliteration);
            logger.log_phase(
                "Romanizing",
                Some(&format!("backend '{}', country '{}'", backend.name(), config.country_code)),
            );
            let (converted, report) =
                convert_japanese_places(&normalized, backend, &config.country_code);
            logger.log_data_quality_issue("fields left untransliterated", report.fields_failed);
            logger.log_completion(report.records_flagged, "records transliterated");
            (converted, report)
        }
        None => {
            info!("Transliteration skipped");
            (normalized, TransliterationReport::default())
        }
    };
    stats.records_transliterated = report.records_flagged;
    stats.fields_transliterated = report.fields_converted;
    stats.fields_left_unchanged = report.fields_unchanged();
    stats.transliteration_time = phase_start.elapsed().as_secs_f64();

    // Blocking and scoring
    let scored = block_and_score(&normalized, &config.blocking, &config.scoring, multi_progress);
    stats.latitude_pairs = scored.latitude_pairs;
    stats.name_location_pairs = scored.name_pairs;
    stats.total_candidate_pairs = scored.total_pairs;
    stats.blocking_time = scored.blocking_time.as_secs_f64();
    stats.score_chunks = scored.tables.len();
    stats.scoring_time = scored.scoring_time.as_secs_f64();
    let score_tables = scored.tables;

    stats.total_processing_time = run_start.elapsed().as_secs_f64();
    log_pipeline_completion(&stats);

    Ok(PipelineOutput {
        normalized,
        report,
        score_tables,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransliterationError;
    use crate::models::core::Place;
    use crate::models::matching::CandidatePair;

    struct UppercaseBackend;

    impl Transliterator for UppercaseBackend {
        fn name(&self) -> &'static str {
            "uppercase"
        }

        fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
            Ok(text.to_uppercase())
        }
    }

    fn places() -> PlaceTable {
        PlaceTable::new(vec![
            Place::new("Cafe A", 1.0, 1.0).with_country("US"),
            Place::new("cafe a", 1.0001, 1.0001).with_country("US"),
            Place::new("Diner B", 50.0, 50.0).with_country("JP"),
        ])
    }

    #[test]
    fn test_pipeline_scores_near_duplicates() {
        let output =
            run_place_matching_pipeline(&places(), &PipelineConfig::default(), None, None).unwrap();
        assert_eq!(output.score_tables.len(), 1);
        let merged = output.merged_scores();
        let row = merged
            .rows
            .iter()
            .find(|row| row.pair() == CandidatePair::new(0, 1))
            .expect("pair (0, 1) should be a candidate");
        assert_eq!(row.name_score, 1.0);
        assert_eq!(output.stats.total_records, 3);
        assert_eq!(output.stats.total_candidate_pairs, merged.len());
        assert_eq!(output.stats.records_transliterated, 0);
    }

    #[test]
    fn test_pipeline_runs_transliteration_for_flagged_records() {
        let output = run_place_matching_pipeline(
            &places(),
            &PipelineConfig::default(),
            Some(&UppercaseBackend),
            None,
        )
        .unwrap();
        assert_eq!(output.report.records_flagged, 1);
        // converted names are lowercased again so name_loc stays consistent
        assert_eq!(output.normalized.places[2].name, "diner b");
        assert_eq!(output.normalized.places[0].name, "cafe a");
    }

    #[test]
    fn test_pipeline_rejects_invalid_config() {
        let mut config = PipelineConfig::default();
        config.blocking.lat_win = 2;
        assert!(run_place_matching_pipeline(&places(), &config, None, None).is_err());
    }
}
