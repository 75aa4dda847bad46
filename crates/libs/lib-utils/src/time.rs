//! # Time Utilities
//!
//! Utilities for time formatting and manipulation using chrono.
//! Contract timestamps are unix seconds.

use chrono::{DateTime, Utc};

/// Current wall-clock time as unix seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Format a unix timestamp (seconds) as RFC3339.
///
/// Out-of-range timestamps are rendered as the raw number.
pub fn format_unix(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
