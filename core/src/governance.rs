//! Governance scorer — VSM weights and governance style to two metrics.
//!
//! For every row:
//!   risk_mitigation_effectiveness = mean(six weights)
//!   operational_efficiency        = baseline * (1 - penalty(style) * severity)
//!
//! Mitigation effectiveness does not depend on the row; it is one scalar
//! per call broadcast to every row so the output aggregates like a column.
//! Efficiency is not clamped: extreme severities can push it negative or
//! above the baseline. That is a known simplification of the model.
//!
//! Rows reach the formula through SeverityInput. Simulation rows remap
//! their Low/Medium/High label; numeric rows pass severity straight through.

use crate::{
    error::{LabError, LabResult},
    simulation::{NumericSeverityRow, SimulationRow},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GovernanceStyle {
    Reactive,
    Preventative,
    Active,
}

impl GovernanceStyle {
    pub const ALL: [GovernanceStyle; 3] = [Self::Reactive, Self::Preventative, Self::Active];

    /// Fraction of severity that erodes the efficiency baseline.
    pub fn penalty_factor(&self) -> f64 {
        match self {
            Self::Reactive => 0.10,
            Self::Preventative => 0.05,
            Self::Active => 0.025,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reactive => "Reactive",
            Self::Preventative => "Preventative",
            Self::Active => "Active",
        }
    }
}

/// Exact, case-sensitive match on the three style names.
impl FromStr for GovernanceStyle {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Reactive" => Ok(Self::Reactive),
            "Preventative" => Ok(Self::Preventative),
            "Active" => Ok(Self::Active),
            other => Err(LabError::InvalidStyle(other.to_string())),
        }
    }
}

impl fmt::Display for GovernanceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six VSM component strengths, each nominally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VsmWeights {
    pub policy_clarity:        f64,
    pub intelligence_strength: f64,
    pub coordination_level:    f64,
    pub control_effectiveness: f64,
    pub feedforward_strength:  f64,
    pub feedback_strength:     f64,
}

impl Default for VsmWeights {
    fn default() -> Self {
        Self::uniform(0.5)
    }
}

impl VsmWeights {
    pub fn uniform(value: f64) -> Self {
        Self::from_array([value; 6])
    }

    /// Order: policy clarity, intelligence, coordination, control,
    /// feedforward, feedback.
    pub fn from_array(w: [f64; 6]) -> Self {
        Self {
            policy_clarity:        w[0],
            intelligence_strength: w[1],
            coordination_level:    w[2],
            control_effectiveness: w[3],
            feedforward_strength:  w[4],
            feedback_strength:     w[5],
        }
    }

    pub fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("policy_clarity", self.policy_clarity),
            ("intelligence_strength", self.intelligence_strength),
            ("coordination_level", self.coordination_level),
            ("control_effectiveness", self.control_effectiveness),
            ("feedforward_strength", self.feedforward_strength),
            ("feedback_strength", self.feedback_strength),
        ]
    }

    /// Reject any weight outside [0, 1] (NaN included).
    pub fn checked(self) -> LabResult<Self> {
        for (name, value) in self.named() {
            if !(0.0..=1.0).contains(&value) {
                return Err(LabError::WeightOutOfRange { name, value });
            }
        }
        Ok(self)
    }

    /// Risk mitigation effectiveness: the plain average of the six weights.
    pub fn mitigation_effectiveness(&self) -> f64 {
        self.named().iter().map(|(_, v)| v).sum::<f64>() / 6.0
    }
}

/// What the efficiency formula needs from a row.
pub trait SeverityInput {
    fn efficiency_baseline(&self) -> f64;
    fn severity_numeric(&self) -> f64;
}

impl SeverityInput for SimulationRow {
    fn efficiency_baseline(&self) -> f64 {
        self.operational_efficiency_baseline
    }

    fn severity_numeric(&self) -> f64 {
        self.risk_severity.numeric()
    }
}

impl SeverityInput for NumericSeverityRow {
    fn efficiency_baseline(&self) -> f64 {
        self.operational_efficiency_baseline
    }

    fn severity_numeric(&self) -> f64 {
        self.severity
    }
}

pub fn operational_efficiency(baseline: f64, severity_numeric: f64, style: GovernanceStyle) -> f64 {
    baseline * (1.0 - style.penalty_factor() * severity_numeric)
}

/// An input row plus the two derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow<R> {
    #[serde(flatten)]
    pub row: R,
    pub risk_mitigation_effectiveness: f64,
    pub operational_efficiency: f64,
}

/// Score every row with an already-parsed style. Returns a fresh table.
pub fn score_with_style<R>(rows: &[R], weights: &VsmWeights, style: GovernanceStyle) -> Vec<ScoredRow<R>>
where
    R: SeverityInput + Clone,
{
    let mitigation = weights.mitigation_effectiveness();
    rows.iter()
        .map(|row| ScoredRow {
            row: row.clone(),
            risk_mitigation_effectiveness: mitigation,
            operational_efficiency: operational_efficiency(
                row.efficiency_baseline(),
                row.severity_numeric(),
                style,
            ),
        })
        .collect()
}

/// Score every row; `style` must be exactly one of the three style names.
pub fn score<R>(rows: &[R], weights: &VsmWeights, style: &str) -> LabResult<Vec<ScoredRow<R>>>
where
    R: SeverityInput + Clone,
{
    let style: GovernanceStyle = style.parse()?;
    let scored = score_with_style(rows, weights, style);
    log::debug!(
        "governance: scored {} row(s) style={style} mitigation={:.4}",
        scored.len(),
        weights.mitigation_effectiveness()
    );
    Ok(scored)
}

/// Categorical-severity call site (simulation table).
pub fn score_simulation(
    rows: &[SimulationRow],
    weights: &VsmWeights,
    style: &str,
) -> LabResult<Vec<ScoredRow<SimulationRow>>> {
    score(rows, weights, style)
}

/// Numeric-severity call site.
pub fn score_numeric(
    rows: &[NumericSeverityRow],
    weights: &VsmWeights,
    style: &str,
) -> LabResult<Vec<ScoredRow<NumericSeverityRow>>> {
    score(rows, weights, style)
}

/// Headline averages for the simulation page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub rows: usize,
    pub avg_risk_mitigation_effectiveness: f64,
    pub avg_operational_efficiency: f64,
}

impl PerformanceSummary {
    /// `None` for an empty table.
    pub fn from_scored<R>(scored: &[ScoredRow<R>]) -> Option<Self> {
        if scored.is_empty() {
            return None;
        }
        let n = scored.len() as f64;
        Some(Self {
            rows: scored.len(),
            avg_risk_mitigation_effectiveness: scored
                .iter()
                .map(|s| s.risk_mitigation_effectiveness)
                .sum::<f64>()
                / n,
            avg_operational_efficiency: scored.iter().map(|s| s.operational_efficiency).sum::<f64>() / n,
        })
    }
}
