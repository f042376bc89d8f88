//! Shared primitive types used across the lab.

use chrono::NaiveDateTime;

/// Trade identifier. Not required to be unique within a table.
pub type TradeId = i64;

/// Identifier of a VSM subsystem in the simulation table (1..=10).
pub type VsmSystemId = u32;

/// Every date-like cell is held as a zone-less date-time.
pub type Timestamp = NaiveDateTime;

/// Canonical text form used when tables are rendered back to strings.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
