//! Data validator — schema check, type coercion, data-quality warnings.
//!
//! RULES:
//!   - A missing required column rejects the whole table (Schema).
//!   - A single uncoercible cell rejects the whole table (Coercion).
//!   - Nulls in required columns never reject; they produce warnings.
//!   - No input at all yields the fixed sample table, never an empty one.

use crate::{
    error::{LabError, LabResult},
    table::RawTable,
    trade::{DataQualityWarning, DataSource, TradeRecord, ValidatedTable, REQUIRED_COLUMNS},
    types::Timestamp,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Validate `raw`, or the fixed sample table when `raw` is `None`.
pub fn validate(raw: Option<&RawTable>) -> LabResult<ValidatedTable> {
    match raw {
        Some(table) => validate_table(table, DataSource::Uploaded),
        None => {
            log::info!("validate: no upload supplied, using sample data");
            validate_table(&fallback_table(), DataSource::Fallback)
        }
    }
}

/// The fixed five-row sample used when nothing was uploaded.
pub fn fallback_table() -> RawTable {
    let headers = [
        "Date",
        "Cost per Trade",
        "Trade ID",
        "Risk Category",
        "Severity",
        "Likelihood",
        "Firm Type",
    ];
    let rows = [
        ["2024-01-01", "10.5", "101", "Market", "5", "6", "A"],
        ["2024-01-02", "12.3", "102", "Operational", "7", "8", "B"],
        ["2024-01-03", "11.0", "103", "Credit", "4", "3", "A"],
        ["2024-01-04", "14.8", "104", "Market", "6", "7", "B"],
        ["2024-01-05", "9.7", "105", "Operational", "8", "9", "A"],
    ];
    RawTable::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| Some(c.to_string())).collect())
            .collect(),
    )
}

fn validate_table(raw: &RawTable, source: DataSource) -> LabResult<ValidatedTable> {
    let mut required_idx = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
        required_idx[slot] = raw.column_index(column).ok_or_else(|| LabError::Schema {
            column: column.to_string(),
        })?;
    }
    let [date_i, cost_i, id_i, cat_i, sev_i, lik_i, firm_i] = required_idx;

    let extra_idx: Vec<usize> = (0..raw.headers.len())
        .filter(|i| !required_idx.contains(i))
        .collect();
    let extra_headers = extra_idx.iter().map(|&i| raw.headers[i].clone()).collect();

    let mut records = Vec::with_capacity(raw.row_count());
    for (row_no, row) in raw.rows.iter().enumerate() {
        // 1-based data row, as a spreadsheet user would count it.
        let row_no = row_no + 1;
        let cell = |i: usize| row.get(i).and_then(|c| c.as_deref());

        records.push(TradeRecord {
            date:           coerce(cell(date_i), "date", row_no, parse_timestamp)?,
            cost_per_trade: coerce(cell(cost_i), "cost_per_trade", row_no, parse_float)?,
            trade_id:       coerce(cell(id_i), "trade_id", row_no, parse_int)?,
            risk_category:  cell(cat_i).map(str::to_string),
            severity:       coerce(cell(sev_i), "severity", row_no, parse_int)?,
            likelihood:     coerce(cell(lik_i), "likelihood", row_no, parse_int)?,
            firm_type:      cell(firm_i).map(str::to_string),
            extra:          extra_idx.iter().map(|&i| cell(i).map(str::to_string)).collect(),
        });
    }

    let warnings = null_warnings(&records);
    for warning in &warnings {
        log::warn!("validate: {warning}");
    }
    log::info!(
        "validate: accepted {} row(s) from {source} with {} warning(s)",
        records.len(),
        warnings.len()
    );

    Ok(ValidatedTable {
        source,
        records,
        extra_headers,
        warnings,
    })
}

fn coerce<T>(
    cell: Option<&str>,
    column: &str,
    row: usize,
    parse: fn(&str) -> Option<T>,
) -> LabResult<Option<T>> {
    match cell {
        None => Ok(None),
        Some(text) => parse(text).map(Some).ok_or_else(|| LabError::Coercion {
            column: column.to_string(),
            row,
            value: text.to_string(),
        }),
    }
}

fn null_warnings(records: &[TradeRecord]) -> Vec<DataQualityWarning> {
    let checks: [(&str, fn(&TradeRecord) -> bool); 7] = [
        ("date", |r| r.date.is_none()),
        ("cost_per_trade", |r| r.cost_per_trade.is_none()),
        ("trade_id", |r| r.trade_id.is_none()),
        ("risk_category", |r| r.risk_category.is_none()),
        ("severity", |r| r.severity.is_none()),
        ("likelihood", |r| r.likelihood.is_none()),
        ("firm_type", |r| r.firm_type.is_none()),
    ];
    checks
        .iter()
        .filter_map(|(column, is_null)| {
            let count = records.iter().filter(|r| is_null(r)).count();
            (count > 0).then(|| DataQualityWarning::MissingValues {
                column: column.to_string(),
                count,
            })
        })
        .collect()
}

/// Parse a date or date-time cell. Bare dates land at midnight.
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Finite floats only; `inf` is rejected as in manual cost entry.
fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integers, or decimals with no fractional part (`"7.0"`).
fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }
    let v = text.parse::<f64>().ok()?;
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    (v.is_finite() && v.fract() == 0.0 && in_range).then_some(v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_formats() {
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-02"), Some(midnight));
        assert_eq!(parse_timestamp("2024/01/02"), Some(midnight));
        assert_eq!(parse_timestamp("01/02/2024"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-02 00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-01-02T00:00:00Z"), Some(midnight));
        assert_eq!(parse_timestamp("invalid-date"), None);
    }

    #[test]
    fn integral_decimals_coerce_to_int() {
        assert_eq!(parse_int("7"), Some(7));
        assert_eq!(parse_int(" 7.0 "), Some(7));
        assert_eq!(parse_int("7.5"), None);
        assert_eq!(parse_int("seven"), None);
        assert_eq!(parse_int("inf"), None);
    }

    #[test]
    fn float_rejects_text() {
        assert_eq!(parse_float("10.5"), Some(10.5));
        assert_eq!(parse_float("1e2"), Some(100.0));
        assert_eq!(parse_float("cheap"), None);
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("-inf"), None);
        assert_eq!(parse_float("-5"), Some(-5.0));
    }
}
