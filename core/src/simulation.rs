//! Simulation-table schema consumed by the governance scorer.

use crate::types::{Timestamp, VsmSystemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical risk severity on simulation rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
}

impl RiskSeverity {
    pub const ALL: [RiskSeverity; 3] = [Self::Low, Self::Medium, Self::High];

    /// Draw probabilities, aligned with `ALL`.
    pub const PROBABILITIES: [f64; 3] = [0.5, 0.3, 0.2];

    /// Fixed remap used by the categorical scoring path.
    pub fn numeric(&self) -> f64 {
        match self {
            Self::Low => 0.2,
            Self::Medium => 0.5,
            Self::High => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-row VSM component impacts. Carried for display; scoring ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactColumns {
    pub policy_clarity_impact:        f64,
    pub intelligence_strength_impact: f64,
    pub coordination_level_impact:    f64,
    pub control_effectiveness_impact: f64,
    pub feedforward_strength_impact:  f64,
    pub feedback_strength_impact:     f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRow {
    pub timestamp:                       Timestamp,
    pub vsm_system_id:                   VsmSystemId,
    /// 1 when a risk event occurred on this row, else 0.
    pub risk_event_flag:                 u8,
    pub risk_severity:                   RiskSeverity,
    pub operational_efficiency_baseline: f64,
    #[serde(flatten)]
    pub impacts:                         ImpactColumns,
}

/// A row whose severity is already numeric (no categorical remap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSeverityRow {
    pub operational_efficiency_baseline: f64,
    pub severity:                        f64,
}
