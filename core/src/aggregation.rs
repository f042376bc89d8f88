//! Chart-ready series and group-by summaries over validated and scored tables.

use crate::{
    governance::ScoredRow,
    simulation::{RiskSeverity, SimulationRow},
    trade::ValidatedTable,
    types::Timestamp,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostPoint {
    pub date: Timestamp,
    pub cost_per_trade: f64,
}

/// Cost per trade ordered by date. Rows with a null date or cost are skipped.
/// Rows sharing a date keep their input order.
pub fn cost_trend(table: &ValidatedTable) -> Vec<CostPoint> {
    let mut points: Vec<CostPoint> = table
        .records
        .iter()
        .filter_map(|r| Some(CostPoint { date: r.date?, cost_per_trade: r.cost_per_trade? }))
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMean {
    pub category: String,
    pub mean:     f64,
    pub count:    usize,
}

/// Mean severity per risk category, ordered by category name.
pub fn mean_severity_by_category(table: &ValidatedTable) -> Vec<CategoryMean> {
    let groups = group_values(
        table
            .records
            .iter()
            .filter_map(|r| Some((r.risk_category.clone()?, r.severity? as f64))),
    );
    groups
        .into_iter()
        .map(|(category, values)| CategoryMean {
            mean: values.iter().sum::<f64>() / values.len() as f64,
            count: values.len(),
            category,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityMeans {
    pub risk_severity: RiskSeverity,
    pub rows: usize,
    pub mean_operational_efficiency: f64,
    pub mean_risk_mitigation_effectiveness: f64,
}

/// Mean of both scored metrics per severity class, Low → High. Classes
/// absent from the table are omitted.
pub fn mean_by_risk_severity(scored: &[ScoredRow<SimulationRow>]) -> Vec<SeverityMeans> {
    let mut sums: BTreeMap<RiskSeverity, (usize, f64, f64)> = BTreeMap::new();
    for s in scored {
        let entry = sums.entry(s.row.risk_severity).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += s.operational_efficiency;
        entry.2 += s.risk_mitigation_effectiveness;
    }
    sums.into_iter()
        .map(|(risk_severity, (rows, oe, rme))| SeverityMeans {
            risk_severity,
            rows,
            mean_operational_efficiency: oe / rows as f64,
            mean_risk_mitigation_effectiveness: rme / rows as f64,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub timestamp: Timestamp,
    pub operational_efficiency: f64,
    pub risk_mitigation_effectiveness: f64,
}

/// Both scored metrics over time, in table order.
pub fn performance_trend(scored: &[ScoredRow<SimulationRow>]) -> Vec<PerformancePoint> {
    scored
        .iter()
        .map(|s| PerformancePoint {
            timestamp: s.row.timestamp,
            operational_efficiency: s.operational_efficiency,
            risk_mitigation_effectiveness: s.risk_mitigation_effectiveness,
        })
        .collect()
}

fn group_values<K: Ord>(pairs: impl Iterator<Item = (K, f64)>) -> BTreeMap<K, Vec<f64>> {
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for (key, value) in pairs {
        groups.entry(key).or_default().push(value);
    }
    groups
}
