//! Untyped tabular input — headers plus string cells.
//!
//! A RawTable is what an upload looks like before validation. Cells are
//! `None` when the source had a null marker (empty, NA, NaN, null, None).

use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Cell texts treated as null, compared case-insensitively after trimming.
const NULL_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows:    Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Parse comma-separated text with a header row.
    pub fn from_csv_str(text: &str) -> LabResult<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> LabResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Parse CSV from any reader. Short rows are padded with nulls.
    pub fn from_reader<R: Read>(reader: R) -> LabResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(LabError::EmptyData);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<Option<String>> = record.iter().map(null_or_text).collect();
            row.resize(headers.len(), None);
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first header whose normalized form equals `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| normalize_header(h) == name)
    }

    /// Borrow every cell of column `idx`.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(idx).and_then(|c| c.as_deref()))
    }

    /// Render back to CSV text (nulls become empty cells).
    pub fn to_csv_string(&self) -> LabResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Cannot flush CSV writer: {e}"))?;
        String::from_utf8(bytes).map_err(|e| anyhow::anyhow!("CSV output is not UTF-8: {e}").into())
    }
}

/// Normalize a header for schema matching: trim, lowercase, and collapse
/// runs of spaces, hyphens and underscores into a single `_`.
///
/// `"Cost per Trade"`, `"cost-per-trade"` and `"cost_per_trade"` all map to
/// `"cost_per_trade"`.
pub fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.trim().chars() {
        if ch == ' ' || ch == '-' || ch == '_' {
            pending_sep = !out.is_empty();
        } else {
            if pending_sep {
                out.push('_');
                pending_sep = false;
            }
            out.extend(ch.to_lowercase());
        }
    }
    out
}

fn null_or_text(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if is_null_marker(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn is_null_marker(cell: &str) -> bool {
    NULL_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("Cost per Trade"), "cost_per_trade");
        assert_eq!(normalize_header("  Trade ID "), "trade_id");
        assert_eq!(normalize_header("risk-category"), "risk_category");
        assert_eq!(normalize_header("firm__type"), "firm_type");
        assert_eq!(normalize_header("Date"), "date");
    }

    #[test]
    fn null_markers_become_none() {
        let table = RawTable::from_csv_str("a,b,c\n1,,NaN\nnull,x,NA\n").unwrap();
        assert_eq!(table.rows[0], vec![Some("1".into()), None, None]);
        assert_eq!(table.rows[1], vec![None, Some("x".into()), None]);
    }

    #[test]
    fn short_rows_are_padded() {
        let table = RawTable::from_csv_str("a,b,c\n1,2\n").unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], None);
    }

    #[test]
    fn empty_input_is_empty_data() {
        let err = RawTable::from_csv_str("").unwrap_err();
        assert!(matches!(err, LabError::EmptyData), "got {err:?}");
    }

    #[test]
    fn csv_text_round_trips() {
        let table = RawTable::from_csv_str("a,b\n\"x, y\",2\n").unwrap();
        let again = RawTable::from_csv_str(&table.to_csv_string().unwrap()).unwrap();
        assert_eq!(table, again);
    }
}
