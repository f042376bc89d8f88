//! Memoization of generator and scorer outputs, keyed by their exact inputs.
//!
//! RULE: the cache only ever holds outputs of deterministic calls.
//! Generator keys carry a concrete seed; callers resolve `None` to a drawn
//! seed before asking. Floats are keyed by bit pattern, so 0.5 and 0.5000001
//! are distinct entries.

use crate::{
    error::LabResult,
    generator::SyntheticGenerator,
    governance::{score_with_style, GovernanceStyle, ScoredRow, VsmWeights},
    simulation::SimulationRow,
};
use chrono::NaiveDate;
use std::{collections::HashMap, rc::Rc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub seed:   u64,
    pub n_rows: usize,
    pub start:  NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ScoreKey {
    table:   TableKey,
    weights: [u64; 6],
    style:   GovernanceStyle,
}

impl ScoreKey {
    fn new(table: TableKey, weights: &VsmWeights, style: GovernanceStyle) -> Self {
        Self {
            table,
            weights: weights.named().map(|(_, v)| v.to_bits()),
            style,
        }
    }
}

pub type ScoredTable = Rc<Vec<ScoredRow<SimulationRow>>>;

#[derive(Default)]
pub struct LabCache {
    tables: HashMap<TableKey, Rc<Vec<SimulationRow>>>,
    scored: HashMap<ScoreKey, ScoredTable>,
    hits:   u64,
    misses: u64,
}

impl LabCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn simulation_table(&mut self, key: TableKey) -> LabResult<Rc<Vec<SimulationRow>>> {
        if let Some(table) = self.tables.get(&key) {
            self.hits += 1;
            log::debug!("cache: table hit seed={:#x} rows={}", key.seed, key.n_rows);
            return Ok(Rc::clone(table));
        }
        self.misses += 1;
        let table = Rc::new(SyntheticGenerator::new(Some(key.seed), key.start).generate(key.n_rows)?);
        self.tables.insert(key, Rc::clone(&table));
        Ok(table)
    }

    /// Score the table for `key`. An invalid style fails before any lookup.
    pub fn scored_table(
        &mut self,
        key: TableKey,
        weights: &VsmWeights,
        style: &str,
    ) -> LabResult<ScoredTable> {
        let style: GovernanceStyle = style.parse()?;
        let score_key = ScoreKey::new(key, weights, style);
        if let Some(scored) = self.scored.get(&score_key) {
            self.hits += 1;
            log::debug!("cache: score hit style={style}");
            return Ok(Rc::clone(scored));
        }

        let table = self.simulation_table(key)?;
        self.misses += 1;
        let scored = Rc::new(score_with_style(table.as_slice(), weights, style));
        self.scored.insert(score_key, Rc::clone(&scored));
        Ok(scored)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
