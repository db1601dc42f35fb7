//! Statistics wire types consumed by the reporting dashboards.
//!
//! Field names here are a compatibility contract: existing consumers read
//! `byType`, `bySite`, `defected`, and `defectPercentage` exactly as
//! spelled, so the serde renames are load-bearing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::InspectionRecord;
use crate::enums::Cadence;

/// Round `100 * numerator / denominator` to the nearest whole percent.
/// A zero denominator yields zero.
#[must_use]
pub fn whole_percent(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        0
    } else {
        (f64::from(numerator) * 100.0 / f64::from(denominator)).round() as u32
    }
}

/// Completion and defect counts for one aggregation bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsBucket {
    /// Distinct assets with at least one qualifying inspection in window.
    pub inspected: u32,
    /// Assets whose latest qualifying inspection is defective.
    pub defected: u32,
    /// Registered assets in this bucket.
    pub total: u32,
    /// `round(100 * inspected / total)`; 0 when `total` is 0.
    pub percentage: u32,
    /// `round(100 * defected / inspected)`; 0 when `inspected` is 0.
    pub defect_percentage: u32,
    /// The latest records behind `inspected`, retained on request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_records: Option<Vec<InspectionRecord>>,
}

impl StatsBucket {
    /// Empty bucket covering `total` registered assets.
    #[must_use]
    pub fn with_total(total: u32) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Recompute the derived percentage fields from the counts.
    pub fn refresh_percentages(&mut self) {
        self.percentage = whole_percent(self.inspected, self.total);
        self.defect_percentage = whole_percent(self.defected, self.inspected);
    }

    /// Fold another bucket's counts into this one. Used to synthesize the
    /// per-type and grand total rows; percentages are refreshed separately.
    pub fn absorb(&mut self, other: &Self) {
        self.inspected += other.inspected;
        self.defected += other.defected;
        self.total += other.total;
    }
}

/// Per-equipment-type statistics with an optional per-site breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeStats {
    #[serde(flatten)]
    pub overall: StatsBucket,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_site: Option<BTreeMap<String, StatsBucket>>,
}

/// The nested statistics structure of one aggregation response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub by_type: BTreeMap<String, TypeStats>,
    pub by_site: BTreeMap<String, StatsBucket>,
    pub total: StatsBucket,
}

/// Aggregation response. The shape is bit-exact for existing dashboard
/// consumers; in particular the public defect count field is `defected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub success: bool,
    pub bu: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    pub frequency: String,
    pub data: StatsData,
    /// RFC 3339 instant of computation.
    pub timestamp: String,
}

impl StatisticsResponse {
    /// Successful response wrapping computed data.
    #[must_use]
    pub fn ok(
        bu: &str,
        site: Option<&str>,
        cadence: Cadence,
        data: StatsData,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            success: true,
            bu: bu.to_string(),
            site: site.map(String::from),
            frequency: cadence.as_str().to_string(),
            data,
            timestamp: now.to_rfc3339(),
        }
    }

    /// Failure response: explicit flag, empty data.
    ///
    /// Returned when a primary fetch fails, so consumers get either a
    /// complete structure or an explicit failure, never silently wrong
    /// totals.
    #[must_use]
    pub fn failure(bu: &str, site: Option<&str>, cadence: Cadence, now: DateTime<Utc>) -> Self {
        Self {
            success: false,
            bu: bu.to_string(),
            site: site.map(String::from),
            frequency: cadence.as_str().to_string(),
            data: StatsData::default(),
            timestamp: now.to_rfc3339(),
        }
    }
}
