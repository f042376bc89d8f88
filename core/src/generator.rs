//! Synthetic simulation table for demonstration sessions.
//!
//! Column distributions:
//!   vsm_system_id                    uniform integer 1..=10
//!   risk_event_flag                  Bernoulli(0.2)
//!   risk_severity                    Low 0.5 / Medium 0.3 / High 0.2
//!   operational_efficiency_baseline  uniform [0.70, 0.95)
//!   *_impact                         Normal(0, sigma), sigma per IMPACT_STD_DEVS
//!
//! Timestamps are consecutive days from `start`. With no seed every call
//! yields a fresh table; with a seed the table is reproducible. A start
//! date too close to the end of the calendar is a DateRange error.

use crate::{
    error::{LabError, LabResult},
    rng::{ColumnRng, ColumnSlot, RngBank},
    simulation::{ImpactColumns, RiskSeverity, SimulationRow},
    types::Timestamp,
};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROWS: usize = 100;
pub const RISK_EVENT_PROBABILITY: f64 = 0.2;
pub const BASELINE_RANGE: (f64, f64) = (0.7, 0.95);
pub const VSM_SYSTEM_ID_RANGE: (u32, u32) = (1, 10);

/// Impact std-devs: policy clarity, intelligence, coordination, control,
/// feedforward, feedback.
pub const IMPACT_STD_DEVS: [f64; 6] = [0.10, 0.15, 0.08, 0.12, 0.09, 0.11];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_rows")]
    pub n_rows: usize,
    #[serde(default)]
    pub seed:   Option<u64>,
    #[serde(default = "default_start")]
    pub start:  NaiveDate,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_rows: DEFAULT_ROWS,
            seed:   None,
            start:  default_start(),
        }
    }
}

pub struct SyntheticGenerator {
    bank:  RngBank,
    start: Timestamp,
}

impl SyntheticGenerator {
    pub fn new(seed: Option<u64>, start: NaiveDate) -> Self {
        Self {
            bank:  RngBank::from_optional_seed(seed),
            start: start.and_time(NaiveTime::MIN),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.seed, config.start)
    }

    /// The seed actually used, drawn or configured.
    pub fn master_seed(&self) -> u64 {
        self.bank.master_seed()
    }

    /// Build `n_rows` rows. Every call restarts the column streams, so a
    /// seeded generator returns the same table each time.
    pub fn generate(&self, n_rows: usize) -> LabResult<Vec<SimulationRow>> {
        let timestamps = self.timestamps(n_rows)?;
        let mut ids = self.bank.for_column(ColumnSlot::VsmSystemId);
        let mut flags = self.bank.for_column(ColumnSlot::RiskEventFlag);
        let mut severities = self.bank.for_column(ColumnSlot::RiskSeverity);
        let mut baselines = self.bank.for_column(ColumnSlot::EfficiencyBaseline);
        let mut impacts = [
            self.bank.for_column(ColumnSlot::PolicyClarityImpact),
            self.bank.for_column(ColumnSlot::IntelligenceStrengthImpact),
            self.bank.for_column(ColumnSlot::CoordinationLevelImpact),
            self.bank.for_column(ColumnSlot::ControlEffectivenessImpact),
            self.bank.for_column(ColumnSlot::FeedforwardStrengthImpact),
            self.bank.for_column(ColumnSlot::FeedbackStrengthImpact),
        ];

        let rows: Vec<SimulationRow> = timestamps
            .into_iter()
            .map(|timestamp| SimulationRow {
                timestamp,
                vsm_system_id: ids.int_inclusive(VSM_SYSTEM_ID_RANGE.0, VSM_SYSTEM_ID_RANGE.1),
                risk_event_flag: u8::from(flags.chance(RISK_EVENT_PROBABILITY)),
                risk_severity: RiskSeverity::ALL[severities.weighted_index(&RiskSeverity::PROBABILITIES)],
                operational_efficiency_baseline: baselines.uniform(BASELINE_RANGE.0, BASELINE_RANGE.1),
                impacts: draw_impacts(&mut impacts),
            })
            .collect();

        log::info!(
            "generator: built {} row(s) seed={:#x}",
            rows.len(),
            self.bank.master_seed()
        );
        Ok(rows)
    }

    fn timestamps(&self, n_rows: usize) -> LabResult<Vec<Timestamp>> {
        (0..n_rows)
            .map(|i| {
                i64::try_from(i)
                    .ok()
                    .and_then(Duration::try_days)
                    .and_then(|offset| self.start.checked_add_signed(offset))
                    .ok_or_else(|| LabError::DateRange {
                        start: self.start.date().to_string(),
                        n_rows,
                    })
            })
            .collect()
    }
}

fn draw_impacts(streams: &mut [ColumnRng; 6]) -> ImpactColumns {
    let mut draw = |i: usize| streams[i].normal(0.0, IMPACT_STD_DEVS[i]);
    ImpactColumns {
        policy_clarity_impact:        draw(0),
        intelligence_strength_impact: draw(1),
        coordination_level_impact:    draw(2),
        control_effectiveness_impact: draw(3),
        feedforward_strength_impact:  draw(4),
        feedback_strength_impact:     draw(5),
    }
}

/// One-shot helper: `n_rows` rows from `seed` (or fresh entropy).
pub fn generate(n_rows: usize, seed: Option<u64>) -> LabResult<Vec<SimulationRow>> {
    SyntheticGenerator::new(seed, default_start()).generate(n_rows)
}
