//! Timestamp encoding.
//!
//! Timestamps are stored as fixed-width UTC text so that string comparison in
//! SQL orders them chronologically.

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

use crate::pool::{DbError, DbResult};

/// Storage format: `2024-05-01T09:30:00.000000Z`.
pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Encode a timestamp for storage, truncated to microseconds.
pub fn encode(ts: &DateTime<Utc>) -> String {
    ts.trunc_subsecs(6).format(STORAGE_FORMAT).to_string()
}

/// Decode a stored timestamp.
pub fn decode(raw: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::Timestamp(format!("{}: {}", raw, e)))
}

/// Read a timestamp column inside a row mapper.
pub(crate) fn column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    decode(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
