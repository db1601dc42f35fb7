//! Latest-record reduction.
//!
//! Deduplicates a window-filtered transaction stream down to one record per
//! physical asset, keeping the instance with the greatest normalized
//! timestamp.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use vigil_core::entities::InspectionRecord;

use crate::index::EquipmentIndex;

/// Asset key for deduplication: one physical unit at one site.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AssetKey {
    /// `None` when the registry knows the asset but not its site. Such
    /// assets count in business-unit-wide rows but never in site buckets.
    pub site: Option<String>,
    pub equipment_type: String,
    pub equipment_id: String,
}

/// One record paired with its normalized instant.
#[derive(Debug, Clone)]
pub struct DatedRecord {
    pub record: InspectionRecord,
    pub at: DateTime<Utc>,
}

/// Reduce a filtered stream to the single latest record per asset key.
///
/// Site is resolved through the join index, never taken from the record.
/// Records for assets absent from the registry are dropped so they cannot
/// inflate `inspected`. A strictly greater timestamp replaces the holder;
/// on exactly equal timestamps the first-seen record is retained.
#[must_use]
pub fn latest_per_asset(
    bu: &str,
    records: Vec<DatedRecord>,
    index: &EquipmentIndex,
) -> BTreeMap<AssetKey, DatedRecord> {
    let mut latest: BTreeMap<AssetKey, DatedRecord> = BTreeMap::new();
    for dated in records {
        if !index.contains(bu, &dated.record.equipment_type, &dated.record.equipment_id) {
            tracing::debug!(
                bu,
                equipment_type = %dated.record.equipment_type,
                equipment_id = %dated.record.equipment_id,
                "inspection for unregistered asset skipped"
            );
            continue;
        }
        let site = index.site_of(bu, &dated.record.equipment_type, &dated.record.equipment_id);
        let key = AssetKey {
            site: site.map(String::from),
            equipment_type: dated.record.equipment_type.clone(),
            equipment_id: dated.record.equipment_id.clone(),
        };
        match latest.get(&key) {
            Some(current) if dated.at <= current.at => {}
            _ => {
                latest.insert(key, dated);
            }
        }
    }
    latest
}
