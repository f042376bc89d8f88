//! Scale-normalized variability statistics.
//!
//! Two distinct operations with distinct degenerate-case tables:
//!
//! | input                 | normalized_std_dev (range) | normalized_sd (mean) |
//! |-----------------------|----------------------------|----------------------|
//! | empty                 | EmptyInput error           | Undefined            |
//! | one value x           | 0.0                        | 0.0, Undefined if x=0|
//! | all equal, mean > 0   | 0.0                        | 0.0                  |
//! | mean = 0, std = 0     | 0.0                        | Undefined            |
//! | mean = 0, std > 0     | pop std / range            | Infinite             |

use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with divisor N.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / values.len() as f64).sqrt())
}

/// Standard deviation with divisor N − 1. Needs at least two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Population std-dev divided by the range (max − min).
pub fn normalized_std_dev(values: &[f64]) -> LabResult<f64> {
    if values.is_empty() {
        return Err(LabError::EmptyInput);
    }
    if values.len() == 1 {
        return Ok(0.0);
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let range = max - min;
    if range == 0.0 {
        return Ok(0.0);
    }

    let std_dev = population_std_dev(values).ok_or(LabError::EmptyInput)?;
    Ok(std_dev / range)
}

/// Result of the mean-normalized variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MeanNormalizedSd {
    Value(f64),
    /// Nothing to measure (empty input, or zero mean and zero spread).
    Undefined,
    /// Spread around a zero mean.
    Infinite,
}

impl MeanNormalizedSd {
    /// Float view for chart adapters: NaN for Undefined, +inf for Infinite.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Value(v) => v,
            Self::Undefined => f64::NAN,
            Self::Infinite => f64::INFINITY,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match *self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for MeanNormalizedSd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.4}"),
            Self::Undefined => f.write_str("undefined"),
            Self::Infinite => f.write_str("infinite (zero mean)"),
        }
    }
}

/// Sample std-dev divided by the mean.
pub fn normalized_sd(values: &[f64]) -> MeanNormalizedSd {
    let Some(m) = mean(values) else {
        return MeanNormalizedSd::Undefined;
    };
    // A lone value has no sample spread; it resolves as std = 0.
    let std_dev = sample_std_dev(values).unwrap_or(0.0);

    match (m == 0.0, std_dev == 0.0) {
        (true, true) => MeanNormalizedSd::Undefined,
        (true, false) => MeanNormalizedSd::Infinite,
        (false, true) => MeanNormalizedSd::Value(0.0),
        (false, false) => MeanNormalizedSd::Value(std_dev / m),
    }
}

/// Parse the comma-separated manual cost entry. Blank tokens are skipped.
pub fn parse_value_list(text: &str) -> LabResult<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LabError::Parse {
                    token: token.to_string(),
                })
        })
        .collect()
}

/// The figures shown together on the cost-variability page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostVariability {
    pub count:              usize,
    pub normalized_std_dev: f64,
    pub std_dev:            f64,
    pub mean:               f64,
}

impl CostVariability {
    pub fn compute(values: &[f64]) -> LabResult<Self> {
        let normalized_std_dev = normalized_std_dev(values)?;
        Ok(Self {
            count: values.len(),
            normalized_std_dev,
            std_dev: population_std_dev(values).unwrap_or(0.0),
            mean: mean(values).unwrap_or(0.0),
        })
    }
}
