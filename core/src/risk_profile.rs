//! Likelihood/severity risk grid.
//!
//! The 1–10 grid is split at 5 on both axes; a score of 5 or less is
//! "low". Quadrants:
//!
//! ```text
//!            likelihood ≤ 5   likelihood > 5
//! sev > 5    Cost             Strategic Risk
//! sev ≤ 5    Ignore           Monitor
//! ```

use crate::{
    error::{LabError, LabResult},
    trade::ValidatedTable,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

pub const SCALE_MIN: i64 = 1;
pub const SCALE_MAX: i64 = 10;
pub const MIDPOINT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    Ignore,
    Monitor,
    Cost,
    StrategicRisk,
}

impl Quadrant {
    pub fn classify(likelihood: i64, severity: i64) -> Self {
        match (likelihood > MIDPOINT, severity > MIDPOINT) {
            (false, false) => Self::Ignore,
            (true, false) => Self::Monitor,
            (false, true) => Self::Cost,
            (true, true) => Self::StrategicRisk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ignore => "Ignore",
            Self::Monitor => "Monitor",
            Self::Cost => "Cost",
            Self::StrategicRisk => "Strategic Risk",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single named risk placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub name:       String,
    pub likelihood: i64,
    pub severity:   i64,
}

impl RiskProfile {
    pub fn new(name: impl Into<String>, likelihood: i64, severity: i64) -> LabResult<Self> {
        check_scale("likelihood", likelihood)?;
        check_scale("severity", severity)?;
        Ok(Self {
            name: name.into(),
            likelihood,
            severity,
        })
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::classify(self.likelihood, self.severity)
    }
}

fn check_scale(field: &'static str, value: i64) -> LabResult<()> {
    if (SCALE_MIN..=SCALE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(LabError::OutOfRange {
            field,
            min: SCALE_MIN,
            max: SCALE_MAX,
            value,
        })
    }
}

/// Count validated rows per quadrant. Rows missing either attribute are
/// skipped. Trade data is not bounded to 1–10, so no range check here.
pub fn quadrant_counts(table: &ValidatedTable) -> BTreeMap<Quadrant, usize> {
    let mut counts = BTreeMap::new();
    for record in &table.records {
        if let (Some(likelihood), Some(severity)) = (record.likelihood, record.severity) {
            *counts.entry(Quadrant::classify(likelihood, severity)).or_insert(0) += 1;
        }
    }
    counts
}
