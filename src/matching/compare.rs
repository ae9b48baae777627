// src/matching/compare.rs
//! Field-level similarity measures used by the pair scorer.
//!
//! String measures are normalized to `[0, 1]`. Numeric measures turn an absolute
//! difference into a `[0, 1]` similarity with a configurable decay.

use std::f64::consts::SQRT_2;
use std::str::FromStr;

use strsim::{jaro, jaro_winkler, normalized_damerau_levenshtein, normalized_levenshtein};

use crate::error::PlaceMatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringMethod {
    #[default]
    Levenshtein,
    DamerauLevenshtein,
    Jaro,
    JaroWinkler,
}

impl StringMethod {
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match self {
            StringMethod::Levenshtein => normalized_levenshtein(a, b),
            StringMethod::DamerauLevenshtein => normalized_damerau_levenshtein(a, b),
            StringMethod::Jaro => jaro(a, b),
            StringMethod::JaroWinkler => jaro_winkler(a, b),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StringMethod::Levenshtein => "levenshtein",
            StringMethod::DamerauLevenshtein => "damerau_levenshtein",
            StringMethod::Jaro => "jaro",
            StringMethod::JaroWinkler => "jaro_winkler",
        }
    }
}

impl FromStr for StringMethod {
    type Err = PlaceMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "levenshtein" => Ok(StringMethod::Levenshtein),
            "damerau_levenshtein" => Ok(StringMethod::DamerauLevenshtein),
            "jaro" => Ok(StringMethod::Jaro),
            "jaro_winkler" | "jarowinkler" => Ok(StringMethod::JaroWinkler),
            other => Err(PlaceMatchError::Configuration(format!(
                "unknown string comparison method '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericMethod {
    Step,
    #[default]
    Linear,
    Exp,
    Gauss,
    Squared,
}

impl NumericMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericMethod::Step => "step",
            NumericMethod::Linear => "linear",
            NumericMethod::Exp => "exp",
            NumericMethod::Gauss => "gauss",
            NumericMethod::Squared => "squared",
        }
    }
}

impl FromStr for NumericMethod {
    type Err = PlaceMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "step" => Ok(NumericMethod::Step),
            "linear" => Ok(NumericMethod::Linear),
            "exp" => Ok(NumericMethod::Exp),
            "gauss" => Ok(NumericMethod::Gauss),
            "squared" => Ok(NumericMethod::Squared),
            other => Err(PlaceMatchError::Configuration(format!(
                "unknown numeric comparison method '{}'",
                other
            ))),
        }
    }
}

/// Decay applied to the absolute difference of two numbers.
///
/// Differences up to `offset` score 1.0; `scale` controls how quickly the score
/// falls beyond that. For `Linear` the score reaches 0.0 at `offset + 2 * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericComparison {
    pub method: NumericMethod,
    pub scale: f64,
    pub offset: f64,
}

impl Default for NumericComparison {
    fn default() -> Self {
        Self {
            method: NumericMethod::Linear,
            scale: 1.0,
            offset: 0.0,
        }
    }
}

impl NumericComparison {
    /// `None` when either side is not a finite number.
    pub fn similarity(&self, a: f64, b: f64) -> Option<f64> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        let d = (a - b).abs();
        let (scale, offset) = (self.scale, self.offset);
        let score = match self.method {
            NumericMethod::Step => {
                if d <= offset {
                    1.0
                } else {
                    0.0
                }
            }
            NumericMethod::Linear => {
                let d = d.clamp(offset, offset + 2.0 * scale);
                1.0 - (d - offset) / (2.0 * scale)
            }
            NumericMethod::Squared => {
                let d = d.clamp(offset, offset + SQRT_2 * scale);
                1.0 - 0.5 * ((d - offset) / scale).powi(2)
            }
            NumericMethod::Exp => {
                if d < offset {
                    1.0
                } else {
                    2f64.powf(-(d - offset) / scale)
                }
            }
            NumericMethod::Gauss => {
                if d < offset {
                    1.0
                } else {
                    2f64.powf(-((d - offset) / scale).powi(2))
                }
            }
        };
        Some(score)
    }
}

/// String similarity with missing-value handling.
///
/// A missing side, or two empty strings, yields `missing_value`: there is nothing to compare.
pub fn compare_strings(
    a: Option<&str>,
    b: Option<&str>,
    method: StringMethod,
    missing_value: f64,
) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if !(a.is_empty() && b.is_empty()) => method.similarity(a, b),
        _ => missing_value,
    }
}

pub fn compare_numbers(
    a: f64,
    b: f64,
    comparison: &NumericComparison,
    missing_value: f64,
) -> f64 {
    comparison.similarity(a, b).unwrap_or(missing_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_identical_strings_score_one() {
        for method in [
            StringMethod::Levenshtein,
            StringMethod::DamerauLevenshtein,
            StringMethod::Jaro,
            StringMethod::JaroWinkler,
        ] {
            let score = compare_strings(Some("cafe a"), Some("cafe a"), method, 0.0);
            assert!((score - 1.0).abs() < EPS, "{:?} gave {}", method, score);
        }
    }

    #[test]
    fn test_levenshtein_is_normalized_by_longest_string() {
        // one substitution over six characters
        let score = compare_strings(Some("cafe a"), Some("cafe b"), StringMethod::Levenshtein, 0.0);
        assert!((score - 5.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn test_missing_strings_use_missing_value() {
        assert_eq!(compare_strings(None, Some("x"), StringMethod::Levenshtein, 0.0), 0.0);
        assert_eq!(compare_strings(Some("x"), None, StringMethod::Jaro, 0.25), 0.25);
        assert_eq!(compare_strings(Some(""), Some(""), StringMethod::Levenshtein, 0.0), 0.0);
        assert_eq!(compare_strings(Some(""), Some("abc"), StringMethod::Levenshtein, 0.0), 0.0);
    }

    #[test]
    fn test_linear_decay() {
        let linear = NumericComparison::default();
        assert_eq!(linear.similarity(1.0, 1.0), Some(1.0));
        assert!((linear.similarity(1.0, 2.0).unwrap() - 0.5).abs() < EPS);
        assert_eq!(linear.similarity(0.0, 5.0), Some(0.0));
        assert!((linear.similarity(1.0, 1.0001).unwrap() - 0.99995).abs() < 1e-9);
    }

    #[test]
    fn test_offset_and_step() {
        let step = NumericComparison {
            method: NumericMethod::Step,
            scale: 1.0,
            offset: 0.5,
        };
        assert_eq!(step.similarity(0.0, 0.5), Some(1.0));
        assert_eq!(step.similarity(0.0, 0.6), Some(0.0));

        let linear = NumericComparison {
            offset: 0.5,
            ..Default::default()
        };
        assert_eq!(linear.similarity(0.0, 0.4), Some(1.0));
        assert!((linear.similarity(0.0, 1.5).unwrap() - 0.5).abs() < EPS);
    }

    #[test]
    fn test_exp_gauss_squared_halve_at_scale() {
        let exp = NumericComparison {
            method: NumericMethod::Exp,
            ..Default::default()
        };
        let gauss = NumericComparison {
            method: NumericMethod::Gauss,
            ..Default::default()
        };
        let squared = NumericComparison {
            method: NumericMethod::Squared,
            ..Default::default()
        };
        assert!((exp.similarity(0.0, 1.0).unwrap() - 0.5).abs() < EPS);
        assert!((gauss.similarity(0.0, 1.0).unwrap() - 0.5).abs() < EPS);
        assert!((squared.similarity(0.0, 1.0).unwrap() - 0.5).abs() < EPS);
        assert!(squared.similarity(0.0, 10.0).unwrap().abs() < EPS);
    }

    #[test]
    fn test_non_finite_numbers_use_missing_value() {
        let linear = NumericComparison::default();
        assert_eq!(linear.similarity(f64::NAN, 1.0), None);
        assert_eq!(compare_numbers(f64::INFINITY, 1.0, &linear, 0.0), 0.0);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("Jaro_Winkler".parse::<StringMethod>().unwrap(), StringMethod::JaroWinkler);
        assert_eq!("gauss".parse::<NumericMethod>().unwrap(), NumericMethod::Gauss);
        assert!("soundex".parse::<StringMethod>().is_err());
        assert!("cubic".parse::<NumericMethod>().is_err());
        assert_eq!(StringMethod::default().as_str(), "levenshtein");
        assert_eq!(NumericMethod::default().as_str(), "linear");
    }
}
