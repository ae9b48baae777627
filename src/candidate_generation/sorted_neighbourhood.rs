// src/candidate_generation/sorted_neighbourhood.rs
//! Sorted-neighbourhood blocking.
//!
//! Records are stably sorted on a key and each record is paired with the records
//! at most `(window - 1) / 2` positions away from it in that order. Two passes are
//! made, one on latitude and one on the `name_loc` key, and their pairs merged.
//!
//! Known recall limitation: blocking is not transitive. If A pairs with B and B with
//! C, A and C only become a candidate when they also share a window in one of the
//! two orders.

use log::debug;
use std::collections::HashSet;

use crate::error::PlaceMatchError;
use crate::models::core::NormalizedTable;
use crate::models::matching::CandidatePair;
use crate::utils::constants::DEFAULT_BLOCKING_WINDOW;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingKey {
    Latitude,
    NameLocation,
}

/// Window sizes for the two blocking passes. Both must be odd and at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingConfig {
    pub lat_win: usize,
    pub name_win: usize,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            lat_win: DEFAULT_BLOCKING_WINDOW,
            name_win: DEFAULT_BLOCKING_WINDOW,
        }
    }
}

impl BlockingConfig {
    pub fn new(lat_win: usize, name_win: usize) -> Result<Self, PlaceMatchError> {
        let config = Self { lat_win, name_win };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PlaceMatchError> {
        for (label, window) in [("lat_win", self.lat_win), ("name_win", self.name_win)] {
            if window == 0 || window % 2 == 0 {
                return Err(PlaceMatchError::Configuration(format!(
                    "{} must be an odd integer >= 1, got {}",
                    label, window
                )));
            }
        }
        Ok(())
    }
}

/// Candidate pairs plus per-pass counts for logging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockingResult {
    pub pairs: Vec<CandidatePair>,
    pub latitude_pairs: usize,
    pub name_pairs: usize,
}

/// Row indices in key order. Ties keep their original row order.
pub fn sorted_order(table: &NormalizedTable, key: BlockingKey) -> Vec<usize> {
    let mut order: Vec<usize> = (0..table.len()).collect();
    let places = &table.places;
    match key {
        BlockingKey::Latitude => {
            order.sort_by(|&a, &b| places[a].latitude.total_cmp(&places[b].latitude))
        }
        BlockingKey::NameLocation => {
            order.sort_by(|&a, &b| places[a].name_loc.cmp(&places[b].name_loc))
        }
    }
    order
}

/// Pair every record with its neighbours within the window, in sorted order.
pub fn sorted_neighbourhood_pairs(
    table: &NormalizedTable,
    key: BlockingKey,
    window: usize,
) -> Vec<CandidatePair> {
    let order = sorted_order(table, key);
    let reach = window / 2;
    let mut pairs = Vec::with_capacity(order.len().saturating_mul(reach));
    for (pos, &left) in order.iter().enumerate() {
        for &right in order.iter().skip(pos + 1).take(reach) {
            pairs.push(CandidatePair::new(left, right));
        }
    }
    debug!(
        "Sorted neighbourhood on {:?} (window {}): {} pairs",
        key,
        window,
        pairs.len()
    );
    pairs
}

/// Union of the latitude and name/location passes with duplicates removed.
/// The first occurrence wins, so latitude pairs come first.
pub fn generate_candidate_pairs(table: &NormalizedTable, config: &BlockingConfig) -> BlockingResult {
    let lat_pairs = sorted_neighbourhood_pairs(table, BlockingKey::Latitude, config.lat_win);
    let name_pairs = sorted_neighbourhood_pairs(table, BlockingKey::NameLocation, config.name_win);
    let (latitude_pairs, name_pair_count) = (lat_pairs.len(), name_pairs.len());

    let mut seen = HashSet::with_capacity(latitude_pairs + name_pair_count);
    let pairs: Vec<CandidatePair> = lat_pairs
        .into_iter()
        .chain(name_pairs)
        .filter(|pair| seen.insert(*pair))
        .collect();

    BlockingResult {
        pairs,
        latitude_pairs,
        name_pairs: name_pair_count,
    }
}
