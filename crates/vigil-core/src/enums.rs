//! Reporting cadences and tagged answer values.
//!
//! `Cadence` uses `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `Answer` uses a custom string form: form submissions arrive as free text
//! and are tagged once at ingestion, so defect detection downstream is a
//! structural match instead of a string scan.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

/// Reporting frequency bucket for an equipment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Daily,
    Monthly,
    Quarterly,
    Annual,
}

impl Cadence {
    /// Every cadence, in reporting order.
    pub const ALL: [Self; 4] = [Self::Daily, Self::Monthly, Self::Quarterly, Self::Annual];

    /// Return the string representation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" => Ok(Self::Annual),
            other => Err(CoreError::InvalidCadence {
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Answer
// ---------------------------------------------------------------------------

/// Tagged answer value for one inspection question.
///
/// Only `Fail` marks a record defective. Non-sentinel text is preserved in
/// `Other` so nothing submitted through a form is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Answer {
    Pass,
    Fail,
    NotApplicable,
    Other(String),
}

/// Values that signal a failed check, compared case-insensitively.
const FAIL_SENTINELS: [&str; 4] = ["fail", "failed", "ng", "no"];

const PASS_SENTINELS: [&str; 5] = ["pass", "passed", "ok", "good", "yes"];

const NA_SENTINELS: [&str; 3] = ["na", "n/a", "not applicable"];

impl Answer {
    /// Tag a raw answer string. Case-insensitive, whitespace-trimmed.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let folded = raw.trim().to_lowercase();
        if FAIL_SENTINELS.contains(&folded.as_str()) {
            Self::Fail
        } else if PASS_SENTINELS.contains(&folded.as_str()) {
            Self::Pass
        } else if NA_SENTINELS.contains(&folded.as_str()) {
            Self::NotApplicable
        } else {
            Self::Other(raw.to_string())
        }
    }

    /// Whether this answer signals a defect.
    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }

    /// Canonical string form written back out.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::NotApplicable => "na",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Answer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Answer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Dynamic document fields are not guaranteed to be strings; anything
        // non-string can never match a sentinel and lands in `Other`.
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => Self::parse(&s),
            other => Self::Other(other.to_string()),
        })
    }
}

impl JsonSchema for Answer {
    fn schema_name() -> Cow<'static, str> {
        "Answer".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({ "type": "string" })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
