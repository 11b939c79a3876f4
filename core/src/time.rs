//! Time related utils.

use crate::{Error, Result};

/// DateTime in UTC, the only zone signing operates in.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Return the current UTC instant.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format a time into the AWS credential-scope date: `20240701`.
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format a time into the compact ISO 8601 timestamp AWS signs: `20240701T000000Z`.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse an RFC 3339 timestamp like `2024-07-01T00:00:00Z`.
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&chrono::Utc))
        .map_err(|e| Error::unexpected(format!("failed to parse time {s}")).with_source(e))
}
