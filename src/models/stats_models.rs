// src/models/stats_models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Summary of one pipeline run, written next to the score output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub run_id: String,
    pub run_timestamp: NaiveDateTime,
    pub description: Option<String>,
    pub total_records: usize,
    pub records_transliterated: usize,
    pub fields_transliterated: usize,
    pub fields_left_unchanged: usize,
    pub latitude_pairs: usize,
    pub name_location_pairs: usize,
    pub total_candidate_pairs: usize,
    pub score_chunks: usize,
    pub normalization_time: f64,
    pub transliteration_time: f64,
    pub blocking_time: f64,
    pub scoring_time: f64,
    pub total_processing_time: f64,
}

impl PipelineStats {
    pub fn new(run_id: &str, run_timestamp: NaiveDateTime, description: Option<&str>) -> Self {
        Self {
            run_id: run_id.to_string(),
            run_timestamp,
            description: description.map(|s| s.to_string()),
            total_records: 0,
            records_transliterated: 0,
            fields_transliterated: 0,
            fields_left_unchanged: 0,
            latitude_pairs: 0,
            name_location_pairs: 0,
            total_candidate_pairs: 0,
            score_chunks: 0,
            normalization_time: 0.0,
            transliteration_time: 0.0,
            blocking_time: 0.0,
            scoring_time: 0.0,
            total_processing_time: 0.0,
        }
    }
}
