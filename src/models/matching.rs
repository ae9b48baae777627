// src/models/matching.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unordered pair of record identifiers, stored with the smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidatePair {
    pub first: usize,
    pub second: usize,
}

impl CandidatePair {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

/// Similarity scores for one candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub index_1: usize,
    pub index_2: usize,
    pub name_score: f64,
    pub latitude_score: f64,
    pub longitude_score: f64,
    pub address_score: f64,
    pub city_score: f64,
    pub country_score: f64,
    pub categories_score: f64,
}

impl ScoreRow {
    pub fn pair(&self) -> CandidatePair {
        CandidatePair::new(self.index_1, self.index_2)
    }

    /// Score values in `ScoreTable::SCORE_COLUMNS` order.
    pub fn scores(&self) -> [f64; 7] {
        [
            self.name_score,
            self.latitude_score,
            self.longitude_score,
            self.address_score,
            self.city_score,
            self.country_score,
            self.categories_score,
        ]
    }

    pub fn score(&self, column: &str) -> Option<f64> {
        ScoreTable::SCORE_COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|idx| self.scores()[idx])
    }
}

/// One chunk of scored pairs. Rows are never mutated after scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub const ID_COLUMNS: [&'static str; 2] = ["index_1", "index_2"];
    pub const SCORE_COLUMNS: [&'static str; 7] = [
        "name_score",
        "latitude_score",
        "longitude_score",
        "address_score",
        "city_score",
        "country_score",
        "categories_score",
    ];

    pub fn new(rows: Vec<ScoreRow>) -> Self {
        Self { rows }
    }

    pub fn columns() -> Vec<&'static str> {
        Self::ID_COLUMNS
            .iter()
            .chain(Self::SCORE_COLUMNS.iter())
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of a single score column, or `None` for an unknown column name.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = Self::SCORE_COLUMNS.iter().position(|c| *c == name)?;
        Some(self.rows.iter().map(|row| row.scores()[idx]).collect())
    }

    /// Concatenate chunked results in chunk order.
    pub fn concat(tables: &[ScoreTable]) -> ScoreTable {
        let total = tables.iter().map(ScoreTable::len).sum();
        let mut rows = Vec::with_capacity(total);
        for table in tables {
            rows.extend_from_slice(&table.rows);
        }
        ScoreTable { rows }
    }
}

/// Identifiers believed to refer to the same real-world place. Built downstream.
pub type MatchGroup<T> = HashSet<T>;

#[cfg(test)]
mod tests {
    use super::*;

    fn row(i: usize, j: usize, name: f64) -> ScoreRow {
        ScoreRow {
            index_1: i,
            index_2: j,
            name_score: name,
            latitude_score: 1.0,
            longitude_score: 1.0,
            address_score: 0.0,
            city_score: 0.0,
            country_score: 1.0,
            categories_score: 0.5,
        }
    }

    #[test]
    fn test_candidate_pair_is_unordered() {
        assert_eq!(CandidatePair::new(4, 1), CandidatePair::new(1, 4));
        let pair = CandidatePair::new(9, 2);
        assert_eq!((pair.first, pair.second), (2, 9));
    }

    #[test]
    fn test_columns_shape() {
        let columns = ScoreTable::columns();
        assert_eq!(columns.len(), 9);
        assert_eq!(columns[0], "index_1");
        assert_eq!(columns[8], "categories_score");
    }

    #[test]
    fn test_column_lookup() {
        let table = ScoreTable::new(vec![row(0, 1, 0.25), row(1, 2, 0.75)]);
        assert_eq!(table.column("name_score"), Some(vec![0.25, 0.75]));
        assert_eq!(table.column("categories_score"), Some(vec![0.5, 0.5]));
        assert!(table.column("index_1").is_none());
        assert_eq!(table.rows[1].score("country_score"), Some(1.0));
    }

    #[test]
    fn test_concat_keeps_chunk_order() {
        let a = ScoreTable::new(vec![row(0, 1, 0.1)]);
        let b = ScoreTable::new(vec![row(2, 3, 0.2), row(4, 5, 0.3)]);
        let merged = ScoreTable::concat(&[a, ScoreTable::default(), b]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.rows[2].pair(), CandidatePair::new(4, 5));
    }
}
