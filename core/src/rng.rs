//! Random number generation for the synthetic generator.
//!
//! All randomness flows through ColumnRng instances derived from one
//! master seed. The seed is optional: without one, a fresh seed is drawn
//! from the thread RNG and logged, so a surprising demo table can still be
//! reproduced afterwards.
//!
//! Each generated column gets its own stream, seeded from
//! (master_seed XOR column_index). This means:
//!   - Adding a new column never changes existing columns' values.
//!   - Each column is reproducible in isolation.

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64Mcg;

/// A named, seeded RNG for a single generated column.
pub struct ColumnRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl ColumnRng {
    /// Create a column RNG from the master seed and a stable column
    /// index. The index must never change once assigned.
    pub fn new(master_seed: u64, column_index: u64) -> Self {
        let derived_seed = master_seed ^ (column_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Roll an integer in [lo, hi] (inclusive on both ends).
    pub fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.inner.gen_range(lo..=hi)
    }

    /// Uniform float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Draw from N(mean, std_dev). A non-positive or non-finite std_dev
    /// collapses to the mean.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) if std_dev > 0.0 => dist.sample(&mut self.inner),
            _ => mean,
        }
    }

    /// Pick an index according to `weights`, which must sum to ~1.0.
    /// Rounding slack at the top end falls into the last bucket.
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        debug_assert!(!weights.is_empty(), "weights must not be empty");
        let roll = self.next_f64();
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if roll < cumulative {
                return i;
            }
        }
        weights.len() - 1
    }
}

/// All column RNGs for a single generation run.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Use `seed` if given, otherwise draw one from OS-seeded entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        let master_seed = seed.unwrap_or_else(|| {
            let drawn = rand::random::<u64>();
            log::debug!("rng: no seed configured, drew {drawn:#x}");
            drawn
        });
        Self::new(master_seed)
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_column(&self, slot: ColumnSlot) -> ColumnRng {
        ColumnRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable column slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every column's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum ColumnSlot {
    VsmSystemId = 0,
    RiskEventFlag = 1,
    RiskSeverity = 2,
    EfficiencyBaseline = 3,
    PolicyClarityImpact = 4,
    IntelligenceStrengthImpact = 5,
    CoordinationLevelImpact = 6,
    ControlEffectivenessImpact = 7,
    FeedforwardStrengthImpact = 8,
    FeedbackStrengthImpact = 9,
    // Add new columns here — append only.
}

impl ColumnSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::VsmSystemId => "vsm_system_id",
            Self::RiskEventFlag => "risk_event_flag",
            Self::RiskSeverity => "risk_severity",
            Self::EfficiencyBaseline => "operational_efficiency_baseline",
            Self::PolicyClarityImpact => "policy_clarity_impact",
            Self::IntelligenceStrengthImpact => "intelligence_strength_impact",
            Self::CoordinationLevelImpact => "coordination_level_impact",
            Self::ControlEffectivenessImpact => "control_effectiveness_impact",
            Self::FeedforwardStrengthImpact => "feedforward_strength_impact",
            Self::FeedbackStrengthImpact => "feedback_strength_impact",
        }
    }
}
