//! Session configuration — every knob the dashboards expose, with the
//! defaults the pages start from.

use crate::{
    benchmark::QualityScores,
    generator::GeneratorConfig,
    governance::{GovernanceStyle, VsmWeights},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    #[serde(default)]
    pub weights: VsmWeights,
    /// Kept as text so an unknown style surfaces as InvalidStyle at
    /// scoring time rather than as a config parse failure.
    #[serde(default = "default_style")]
    pub style:   String,
}

fn default_style() -> String {
    GovernanceStyle::Reactive.as_str().to_string()
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            weights: VsmWeights::default(),
            style:   default_style(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfileConfig {
    pub name:       String,
    pub likelihood: i64,
    pub severity:   i64,
}

impl Default for RiskProfileConfig {
    fn default() -> Self {
        Self {
            name:       "Data Breach".into(),
            likelihood: 8,
            severity:   7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub firm:      QualityScores,
    pub benchmark: QualityScores,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            firm:      QualityScores { output: 75, process: 80, audience: 90, success: 70 },
            benchmark: QualityScores { output: 80, process: 75, audience: 85, success: 75 },
        }
    }
}

/// Where the cost-variability page takes its numbers from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "text", rename_all = "snake_case")]
pub enum CostSource {
    /// `cost_per_trade` of the loaded dataset.
    #[default]
    Dataset,
    /// Comma-separated manual entry.
    Manual(String),
}

pub const DEFAULT_MANUAL_COSTS: &str = "10, 12, 15, 11, 13";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabConfig {
    /// CSV upload; `None` selects the built-in sample table.
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
    #[serde(default)]
    pub generator:    GeneratorConfig,
    #[serde(default)]
    pub governance:   GovernanceConfig,
    #[serde(default)]
    pub risk_profile: RiskProfileConfig,
    #[serde(default)]
    pub benchmark:    BenchmarkConfig,
    #[serde(default)]
    pub cost_source:  CostSource,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            generator:    GeneratorConfig::default(),
            governance:   GovernanceConfig::default(),
            risk_profile: RiskProfileConfig::default(),
            benchmark:    BenchmarkConfig::default(),
            cost_source:  CostSource::Dataset,
        }
    }
}

impl LabConfig {
    /// Load from a JSON file. Missing sections take their defaults.
    /// In tests, use LabConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: LabConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        log::info!("config: loaded {path}");
        Ok(config)
    }

    /// Seeded defaults with manual cost entry, for reproducible tests.
    pub fn default_test() -> Self {
        Self {
            generator: GeneratorConfig {
                seed: Some(42),
                ..GeneratorConfig::default()
            },
            cost_source: CostSource::Manual(DEFAULT_MANUAL_COSTS.to_string()),
            ..Self::default()
        }
    }
}
