//! Validated trade table — typed rows, dtype map, descriptive summary.

use crate::{
    table::RawTable,
    types::{Timestamp, TradeId, TIMESTAMP_FORMAT},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Required columns in their canonical (normalized) form and check order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "date",
    "cost_per_trade",
    "trade_id",
    "risk_category",
    "severity",
    "likelihood",
    "firm_type",
];

/// One coerced row. A `None` field is a null that survived coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date:           Option<Timestamp>,
    pub cost_per_trade: Option<f64>,
    pub trade_id:       Option<TradeId>,
    pub risk_category:  Option<String>,
    pub severity:       Option<i64>,
    pub likelihood:     Option<i64>,
    pub firm_type:      Option<String>,
    /// Cells of non-required columns, aligned with `ValidatedTable::extra_headers`.
    #[serde(default)]
    pub extra:          Vec<Option<String>>,
}

impl TradeRecord {
    pub fn null_count(&self) -> usize {
        [
            self.date.is_none(),
            self.cost_per_trade.is_none(),
            self.trade_id.is_none(),
            self.risk_category.is_none(),
            self.severity.is_none(),
            self.likelihood.is_none(),
            self.firm_type.is_none(),
        ]
        .iter()
        .filter(|&&missing| missing)
        .count()
    }
}

/// Where a validated table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Uploaded,
    Fallback,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uploaded => write!(f, "uploaded data"),
            Self::Fallback => write!(f, "sample data"),
        }
    }
}

/// Soft data-quality signal. The table carrying it is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    MissingValues { column: String, count: usize },
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValues { column, count } => write!(
                f,
                "Missing values detected in critical field `{column}` ({count} row(s)). Please review your data."
            ),
        }
    }
}

/// Column storage type as shown on the data page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    DateTime,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Text,
}

impl ColumnType {
    /// Smallest signed integer width holding every value in `values`.
    pub fn smallest_int<I: IntoIterator<Item = i64>>(values: I) -> Self {
        let (lo, hi) = values
            .into_iter()
            .fold((0i64, 0i64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo >= i8::MIN as i64 && hi <= i8::MAX as i64 {
            Self::Int8
        } else if lo >= i16::MIN as i64 && hi <= i16::MAX as i64 {
            Self::Int16
        } else if lo >= i32::MIN as i64 && hi <= i32::MAX as i64 {
            Self::Int32
        } else {
            Self::Int64
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateTime => "datetime",
            Self::Float64 => "float64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// count/mean/std/min/max over the non-null values of one numeric column.
/// `std` is the sample standard deviation and is absent below two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count:  usize,
    pub mean:   Option<f64>,
    pub std:    Option<f64>,
    pub min:    Option<f64>,
    pub max:    Option<f64>,
}

impl ColumnSummary {
    pub fn from_values(column: &str, values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self { column: column.to_string(), count, mean: None, std: None, min: None, max: None };
        }
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        });
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            column: column.to_string(),
            count,
            mean: Some(mean),
            std,
            min: Some(min),
            max: Some(max),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedTable {
    pub source:        DataSource,
    pub records:       Vec<TradeRecord>,
    pub extra_headers: Vec<String>,
    pub warnings:      Vec<DataQualityWarning>,
}

impl ValidatedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Non-null `cost_per_trade` values in row order.
    pub fn costs(&self) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.cost_per_trade).collect()
    }

    /// Column → dtype mapping for display.
    pub fn dtypes(&self) -> Vec<(String, ColumnType)> {
        let int_type = |get: fn(&TradeRecord) -> Option<i64>| {
            ColumnType::smallest_int(self.records.iter().filter_map(get))
        };
        let mut out = vec![
            ("date".to_string(), ColumnType::DateTime),
            ("cost_per_trade".to_string(), ColumnType::Float64),
            ("trade_id".to_string(), int_type(|r| r.trade_id)),
            ("risk_category".to_string(), ColumnType::Text),
            ("severity".to_string(), int_type(|r| r.severity)),
            ("likelihood".to_string(), int_type(|r| r.likelihood)),
            ("firm_type".to_string(), ColumnType::Text),
        ];
        out.extend(self.extra_headers.iter().map(|h| (h.clone(), ColumnType::Text)));
        out
    }

    /// Descriptive statistics for every numeric required column.
    pub fn describe(&self) -> Vec<ColumnSummary> {
        let collect = |get: fn(&TradeRecord) -> Option<f64>| -> Vec<f64> {
            self.records.iter().filter_map(get).collect()
        };
        vec![
            ColumnSummary::from_values("cost_per_trade", &collect(|r| r.cost_per_trade)),
            ColumnSummary::from_values("trade_id", &collect(|r| r.trade_id.map(|v| v as f64))),
            ColumnSummary::from_values("severity", &collect(|r| r.severity.map(|v| v as f64))),
            ColumnSummary::from_values("likelihood", &collect(|r| r.likelihood.map(|v| v as f64))),
        ]
    }

    /// Render back to untyped form with canonical headers, so the result
    /// can be fed to the validator again.
    pub fn to_raw(&self) -> RawTable {
        let mut headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        headers.extend(self.extra_headers.iter().cloned());

        let rows = self
            .records
            .iter()
            .map(|r| {
                let mut row = vec![
                    r.date.map(|d| d.format(TIMESTAMP_FORMAT).to_string()),
                    r.cost_per_trade.map(|v| v.to_string()),
                    r.trade_id.map(|v| v.to_string()),
                    r.risk_category.clone(),
                    r.severity.map(|v| v.to_string()),
                    r.likelihood.map(|v| v.to_string()),
                    r.firm_type.clone(),
                ];
                row.extend(r.extra.iter().cloned());
                row
            })
            .collect();

        RawTable::new(headers, rows)
    }
}
