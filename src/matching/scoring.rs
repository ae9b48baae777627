// src/matching/scoring.rs
use indicatif::MultiProgress;
use log::{debug, info};
use std::time::{Duration, Instant};

use crate::candidate_generation::{generate_candidate_pairs, BlockingConfig};
use crate::error::PlaceMatchError;
use crate::matching::compare::{
    compare_numbers, compare_strings, NumericComparison, StringMethod,
};
use crate::models::core::NormalizedTable;
use crate::models::matching::{CandidatePair, ScoreRow, ScoreTable};
use crate::utils::constants::{DEFAULT_CHUNK_COUNT, DEFAULT_CHUNK_THRESHOLD};
use crate::utils::get_memory_usage;
use crate::utils::progress_bars::logging::{PipelineStage, StageLogger};
use crate::utils::progress_bars::progress_config::stage_bar;

/// How pairs are compared and when the candidate set is split into chunks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub string_method: StringMethod,
    pub numeric: NumericComparison,
    /// Score used when a field is missing on either side.
    pub missing_value: f64,
    /// Candidate sets strictly larger than this are chunked.
    pub chunk_threshold: usize,
    pub chunk_count: usize,
    /// Report process memory after each chunk.
    pub log_memory: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            string_method: StringMethod::default(),
            numeric: NumericComparison::default(),
            missing_value: 0.0,
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
            chunk_count: DEFAULT_CHUNK_COUNT,
            log_memory: false,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), PlaceMatchError> {
        if self.chunk_count == 0 {
            return Err(PlaceMatchError::Configuration(
                "chunk_count must be at least 1".to_string(),
            ));
        }
        if self.numeric.scale.is_nan() || self.numeric.scale <= 0.0 {
            return Err(PlaceMatchError::Configuration(format!(
                "numeric scale must be positive, got {}",
                self.numeric.scale
            )));
        }
        if self.numeric.offset.is_nan() || self.numeric.offset < 0.0 {
            return Err(PlaceMatchError::Configuration(format!(
                "numeric offset must be non-negative, got {}",
                self.numeric.offset
            )));
        }
        Ok(())
    }

    /// Number of score tables `len` pairs will be split into.
    pub fn chunks_for(&self, len: usize) -> usize {
        if len > self.chunk_threshold {
            self.chunk_count
        } else {
            1
        }
    }
}

/// Compares the seven fields of a candidate pair.
pub(crate) struct PairScorer<'a> {
    table: &'a NormalizedTable,
    config: &'a ScoringConfig,
}

impl<'a> PairScorer<'a> {
    pub(crate) fn new(table: &'a NormalizedTable, config: &'a ScoringConfig) -> Self {
        Self { table, config }
    }

    fn strings(&self, a: Option<&str>, b: Option<&str>) -> f64 {
        compare_strings(a, b, self.config.string_method, self.config.missing_value)
    }

    fn numbers(&self, a: f64, b: f64) -> f64 {
        compare_numbers(a, b, &self.config.numeric, self.config.missing_value)
    }

    /// Indices must be inside the table; callers check or generate them from it.
    pub(crate) fn score_pair(&self, pair: &CandidatePair) -> ScoreRow {
        let a = &self.table.places[pair.first];
        let b = &self.table.places[pair.second];
        ScoreRow {
            index_1: pair.first,
            index_2: pair.second,
            name_score: self.strings(Some(a.name.as_str()), Some(b.name.as_str())),
            latitude_score: self.numbers(a.latitude, b.latitude),
            longitude_score: self.numbers(a.longitude, b.longitude),
            address_score: self.strings(a.address.as_deref(), b.address.as_deref()),
            city_score: self.strings(Some(a.city.as_str()), Some(b.city.as_str())),
            country_score: self.strings(Some(a.country.as_str()), Some(b.country.as_str())),
            categories_score: self.strings(a.categories.as_deref(), b.categories.as_deref()),
        }
    }

    pub(crate) fn score_pairs(&self, pairs: &[CandidatePair]) -> ScoreTable {
        ScoreTable::new(pairs.iter().map(|pair| self.score_pair(pair)).collect())
    }
}

/// Split into exactly `n` contiguous chunks; the first `len % n` are one element longer.
pub fn index_split<T>(items: &[T], n: usize) -> Vec<&[T]> {
    if n == 0 {
        return vec![items];
    }
    let base = items.len() / n;
    let extra = items.len() % n;
    let mut chunks = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let size = base + usize::from(i < extra);
        chunks.push(&items[start..start + size]);
        start += size;
    }
    chunks
}

/// Score an already generated candidate set.
///
/// Returns one table when the set is at most `chunk_threshold` pairs, otherwise
/// exactly `chunk_count` tables in chunk order. Callers concatenate the result.
/// A pair pointing outside `table` is a `Configuration` error.
pub fn score_candidate_pairs(
    pairs: &[CandidatePair],
    table: &NormalizedTable,
    config: &ScoringConfig,
    multi_progress: Option<MultiProgress>,
) -> Result<Vec<ScoreTable>, PlaceMatchError> {
    if let Some(pair) = pairs.iter().find(|pair| pair.second >= table.len()) {
        return Err(PlaceMatchError::Configuration(format!(
            "candidate pair ({}, {}) is outside a table of {} records",
            pair.first,
            pair.second,
            table.len()
        )));
    }
    Ok(score_in_chunks(pairs, table, config, multi_progress))
}

fn score_in_chunks(
    pairs: &[CandidatePair],
    table: &NormalizedTable,
    config: &ScoringConfig,
    multi_progress: Option<MultiProgress>,
) -> Vec<ScoreTable> {
    let logger = StageLogger::new(PipelineStage::Scoring);
    let scorer = PairScorer::new(table, config);
    let chunk_count = config.chunks_for(pairs.len());
    logger.log_chunking(pairs.len(), chunk_count, config.chunk_threshold);

    if chunk_count == 1 {
        let scores = scorer.score_pairs(pairs);
        logger.log_completion(scores.len(), "pairs scored");
        return vec![scores];
    }

    let pb = multi_progress
        .as_ref()
        .map(|mp| stage_bar(mp, chunk_count as u64, "Scoring chunks"));

    let chunks = index_split(pairs, chunk_count);
    let mut tables = Vec::with_capacity(chunks.len());
    for (idx, chunk) in chunks.into_iter().enumerate() {
        let scores = scorer.score_pairs(chunk);
        logger.log_chunk_progress(idx + 1, chunk_count, scores.len());
        if config.log_memory {
            debug!("Memory after chunk {}: {} MB", idx + 1, get_memory_usage());
        }
        tables.push(scores);
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_with_message("Scoring complete");
    }

    logger.log_completion(pairs.len(), "pairs scored");
    tables
}

/// Score tables plus the blocking counts and stage timings behind them.
#[derive(Debug, Clone, Default)]
pub struct ScoredCandidates {
    pub tables: Vec<ScoreTable>,
    pub latitude_pairs: usize,
    pub name_pairs: usize,
    pub total_pairs: usize,
    pub blocking_time: Duration,
    pub scoring_time: Duration,
}

/// Block the table and score every candidate pair, keeping the counts for reporting.
pub fn block_and_score(
    table: &NormalizedTable,
    blocking: &BlockingConfig,
    config: &ScoringConfig,
    multi_progress: Option<MultiProgress>,
) -> ScoredCandidates {
    let logger = StageLogger::new(PipelineStage::Blocking);
    logger.log_start(table.len());
    let blocked = generate_candidate_pairs(table, blocking);
    logger.log_pair_generation(blocked.latitude_pairs, blocked.name_pairs, blocked.pairs.len());
    let blocking_time = logger.get_elapsed();
    info!(
        "Scoring {} candidate pairs across {} records",
        blocked.pairs.len(),
        table.len()
    );

    // pairs come from this table, so no bounds check
    let scoring_start = Instant::now();
    let tables = score_in_chunks(&blocked.pairs, table, config, multi_progress);
    ScoredCandidates {
        tables,
        latitude_pairs: blocked.latitude_pairs,
        name_pairs: blocked.name_pairs,
        total_pairs: blocked.pairs.len(),
        blocking_time,
        scoring_time: scoring_start.elapsed(),
    }
}

/// Block the table on latitude and on `name_loc`, then score every candidate pair.
pub fn get_score(
    table: &NormalizedTable,
    blocking: &BlockingConfig,
    config: &ScoringConfig,
    multi_progress: Option<MultiProgress>,
) -> Vec<ScoreTable> {
    block_and_score(table, blocking, config, multi_progress).tables
}
