//! One dashboard session — the hand-off point between pages.
//!
//! FLOW (fixed):
//!   1. load_dataset()     validator writes the current dataset slot
//!   2. cost_values()      dispersion page reads the slot (or manual entry)
//!   3. simulate()         scorer runs over the session's synthetic table
//!
//! RULES:
//!   - The dataset slot is a field of the Session value the caller owns
//!     and passes around. There is no global current dataset.
//!   - A failed load clears the slot; downstream pages then see no data.
//!   - The generator seed is fixed for the lifetime of the session.

use crate::{
    cache::{LabCache, ScoredTable, TableKey},
    config::{CostSource, LabConfig},
    dispersion::parse_value_list,
    error::LabResult,
    governance::VsmWeights,
    rng::RngBank,
    table::RawTable,
    trade::ValidatedTable,
    validator,
};

pub struct Session {
    pub config: LabConfig,
    table_key:  TableKey,
    dataset:    Option<ValidatedTable>,
    cache:      LabCache,
}

impl Session {
    pub fn new(config: LabConfig) -> Self {
        let seed = RngBank::from_optional_seed(config.generator.seed).master_seed();
        let table_key = TableKey {
            seed,
            n_rows: config.generator.n_rows,
            start: config.generator.start,
        };
        log::info!("session: started seed={seed:#x} rows={}", table_key.n_rows);
        Self {
            config,
            table_key,
            dataset: None,
            cache: LabCache::new(),
        }
    }

    /// Seed backing this session's synthetic table.
    pub fn seed(&self) -> u64 {
        self.table_key.seed
    }

    /// Validate `raw` (or the sample table) into the dataset slot.
    pub fn load_dataset(&mut self, raw: Option<&RawTable>) -> LabResult<&ValidatedTable> {
        self.dataset = None;
        let validated = validator::validate(raw)?;
        let stored: &ValidatedTable = self.dataset.insert(validated);
        Ok(stored)
    }

    /// Parse uploaded CSV text and validate it into the slot.
    pub fn load_csv(&mut self, text: &str) -> LabResult<&ValidatedTable> {
        self.dataset = None;
        let raw = RawTable::from_csv_str(text)?;
        self.load_dataset(Some(&raw))
    }

    /// Read the configured CSV path, or the sample table if none is set.
    pub fn load_configured_dataset(&mut self) -> LabResult<&ValidatedTable> {
        match self.config.dataset_path.clone() {
            Some(path) => {
                self.dataset = None;
                let raw = RawTable::from_path(&path)?;
                self.load_dataset(Some(&raw))
            }
            None => self.load_dataset(None),
        }
    }

    pub fn dataset(&self) -> Option<&ValidatedTable> {
        self.dataset.as_ref()
    }

    /// Numbers for the cost-variability page. `Dataset` with nothing
    /// loaded yields an empty list; the metric reports it as EmptyInput.
    pub fn cost_values(&self, source: &CostSource) -> LabResult<Vec<f64>> {
        match source {
            CostSource::Dataset => Ok(self.dataset.as_ref().map(ValidatedTable::costs).unwrap_or_default()),
            CostSource::Manual(text) => parse_value_list(text),
        }
    }

    /// Score the session's synthetic table (memoized per parameter set).
    pub fn simulate(&mut self, weights: &VsmWeights, style: &str) -> LabResult<ScoredTable> {
        self.cache.scored_table(self.table_key, weights, style)
    }

    pub fn cache(&self) -> &LabCache {
        &self.cache
    }
}
