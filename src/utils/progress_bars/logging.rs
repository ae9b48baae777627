// src/utils/progress_bars/logging.rs - Logging helpers for pipeline stages
use log::{info, warn};
use std::time::{Duration, Instant};

use crate::models::stats_models::PipelineStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Normalization,
    Transliteration,
    Blocking,
    Scoring,
}

impl PipelineStage {
    pub fn label(&self) -> (&'static str, &'static str) {
        match self {
            PipelineStage::Normalization => ("NORMALIZE", "🔤"),
            PipelineStage::Transliteration => ("TRANSLITERATE", "🈁"),
            PipelineStage::Blocking => ("BLOCKING", "🧱"),
            PipelineStage::Scoring => ("SCORING", "📐"),
        }
    }
}

#[derive(Clone)]
pub struct StageLogger {
    stage_name: &'static str,
    stage_emoji: &'static str,
    start_time: Instant,
}

impl StageLogger {
    pub fn new(stage: PipelineStage) -> Self {
        let (stage_name, stage_emoji) = stage.label();
        Self {
            stage_name,
            stage_emoji,
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, records: usize) {
        info!(
            "[{}] {} 🚀 Starting {} over {} records",
            self.stage_name,
            self.stage_emoji,
            self.stage_name.to_lowercase(),
            records
        );
    }

    pub fn log_phase(&self, phase: &str, details: Option<&str>) {
        let elapsed = self.start_time.elapsed();
        let msg = if let Some(details) = details {
            format!(
                "[{}] {} 🔄 Phase: {} - {} [+{:.1}s]",
                self.stage_name, self.stage_emoji, phase, details, elapsed.as_secs_f32()
            )
        } else {
            format!(
                "[{}] {} 🔄 Phase: {} [+{:.1}s]",
                self.stage_name, self.stage_emoji, phase, elapsed.as_secs_f32()
            )
        };
        info!("{}", msg);
    }

    pub fn log_pair_generation(&self, latitude_pairs: usize, name_pairs: usize, merged: usize) {
        let duplicates = (latitude_pairs + name_pairs).saturating_sub(merged);
        info!(
            "[{}] {} 📈 Candidate pairs: {} by latitude + {} by name/location → {} unique ({} duplicates dropped)",
            self.stage_name, self.stage_emoji, latitude_pairs, name_pairs, merged, duplicates
        );
    }

    pub fn log_chunking(&self, total_pairs: usize, chunk_count: usize, threshold: usize) {
        if chunk_count > 1 {
            info!(
                "[{}] {} ⚙️  {} pairs exceed {} - scoring in {} chunks",
                self.stage_name, self.stage_emoji, total_pairs, threshold, chunk_count
            );
        } else {
            info!(
                "[{}] {} ⚙️  Scoring {} pairs in a single table",
                self.stage_name, self.stage_emoji, total_pairs
            );
        }
    }

    pub fn log_chunk_progress(&self, chunk_num: usize, total_chunks: usize, pairs_in_chunk: usize) {
        if chunk_num % 5 == 0 || chunk_num == 1 || chunk_num == total_chunks {
            info!(
                "[{}] {} 📦 Scored chunk {}/{} ({} pairs)",
                self.stage_name, self.stage_emoji, chunk_num, total_chunks, pairs_in_chunk
            );
        }
    }

    pub fn log_completion(&self, items: usize, item_type: &str) {
        info!(
            "[{}] {} ✅ Completed: {} {} in {:.2?}",
            self.stage_name,
            self.stage_emoji,
            items,
            item_type,
            self.start_time.elapsed()
        );
    }

    pub fn log_data_quality_issue(&self, issue_type: &str, count: usize) {
        if count > 0 {
            warn!(
                "[{}] {} ⚠️  Data quality: {} instances of {}",
                self.stage_name, self.stage_emoji, count, issue_type
            );
        }
    }

    pub fn get_elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// Pipeline-level logging functions
pub fn log_pipeline_start(run_id: &str, records: usize, lat_win: usize, name_win: usize) {
    info!("🚀 ===== PLACE MATCHING PIPELINE STARTING =====");
    info!("📅 Pipeline Run ID: {}", run_id);
    info!("⚙️  Configuration:");
    info!("   • {} input records", records);
    info!("   • Latitude window: {}", lat_win);
    info!("   • Name/location window: {}", name_win);
    info!("================================================");
}

pub fn log_pipeline_completion(stats: &PipelineStats) {
    info!("🎉 ===== PLACE MATCHING PIPELINE COMPLETED =====");
    info!("📅 Pipeline Run ID: {}", stats.run_id);
    info!("⏱️  Total Duration: {:.2}s", stats.total_processing_time);
    info!("📊 Records: {}", stats.total_records);
    info!(
        "🈁 Transliterated: {} records ({} fields converted, {} left unchanged)",
        stats.records_transliterated, stats.fields_transliterated, stats.fields_left_unchanged
    );
    info!(
        "🎯 Candidate pairs: {} ({} by latitude, {} by name/location)",
        stats.total_candidate_pairs, stats.latitude_pairs, stats.name_location_pairs
    );
    info!("📦 Score tables: {}", stats.score_chunks);
    info!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_labels_are_distinct() {
        let stages = [
            PipelineStage::Normalization,
            PipelineStage::Transliteration,
            PipelineStage::Blocking,
            PipelineStage::Scoring,
        ];
        let mut names: Vec<_> = stages.iter().map(|s| s.label().0).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), stages.len());
    }

    #[test]
    fn test_logger_tracks_elapsed_time() {
        let logger = StageLogger::new(PipelineStage::Blocking);
        logger.log_pair_generation(10, 8, 15);
        logger.log_chunking(15, 1, 10_000);
        assert!(logger.get_elapsed() >= Duration::ZERO);
    }
}
