//! Timestamp normalization for heterogeneous source records.
//!
//! Inspection documents reach this system from several writers and carry
//! timestamps in different shapes: an already-normalized RFC 3339 instant, a
//! serialized epoch object with split seconds/nanoseconds fields, a bare
//! epoch number, or a free-form date string. [`RawTimestamp`] deserializes
//! all of them; [`RawTimestamp::normalize`] converts to one comparable
//! instant. All source-specific parsing lives here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Epoch values at or above this magnitude are milliseconds, not seconds.
const EPOCH_MILLIS_CUTOFF: f64 = 1e12;

/// One raw timestamp value of unknown shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// An instant that already parses as RFC 3339.
    Instant(DateTime<Utc>),
    /// Serialized epoch object with split sub-second precision.
    Epoch {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// Bare epoch number, in seconds or milliseconds.
    Numeric(f64),
    /// Any other string form, parsed lazily.
    Text(String),
}

impl RawTimestamp {
    /// Convert to a comparable instant.
    ///
    /// `None` means the value is unparsable; callers must treat that as
    /// "exclude this record from time-sensitive comparisons".
    #[must_use]
    pub fn normalize(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Instant(dt) => Some(*dt),
            Self::Epoch {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            Self::Numeric(n) => normalize_epoch(*n),
            Self::Text(s) => parse_text(s),
        }
    }

    /// Wrap an already-normalized instant (fixtures and adapters).
    #[must_use]
    pub const fn from_instant(dt: DateTime<Utc>) -> Self {
        Self::Instant(dt)
    }
}

fn normalize_epoch(n: f64) -> Option<DateTime<Utc>> {
    if !n.is_finite() {
        return None;
    }
    let millis = if n.abs() >= EPOCH_MILLIS_CUTOFF {
        n
    } else {
        n * 1000.0
    };
    DateTime::from_timestamp_millis(millis as i64)
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
