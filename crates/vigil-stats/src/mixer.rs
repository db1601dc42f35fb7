//! Merged inspection history across mixer subtypes.
//!
//! Some equipment families are inspected under several procedural variants,
//! each stored under its own type tag. One physical asset's history is the
//! union of its records across every tag of its family.

use futures::future::join_all;

use vigil_config::MixerFamily;
use vigil_core::entities::InspectionRecord;

use crate::source::RecordSource;

/// Fetch one asset's inspection history across every tag of a family and
/// merge into a single stream, newest first.
///
/// One fetch is issued per tag, concurrently, and each fails independently:
/// a failing variant contributes no records and does not abort the merge.
/// Records without a normalizable timestamp sort last.
pub async fn merged_history<S: RecordSource>(
    source: &S,
    bu: &str,
    equipment_id: &str,
    family: &MixerFamily,
) -> Vec<InspectionRecord> {
    let fetches = family
        .tags()
        .map(|tag| async move { (tag, source.inspections(bu, None, Some(tag)).await) });

    let mut merged = Vec::new();
    for (tag, result) in join_all(fetches).await {
        match result {
            Ok(records) => merged.extend(
                records
                    .into_iter()
                    .map(InspectionRecord::normalized)
                    .filter(|record| record.equipment_id == equipment_id),
            ),
            Err(e) => {
                tracing::warn!(bu, equipment_type = tag, %e, "subtype history fetch failed");
            }
        }
    }
    merged.sort_by(|a, b| b.timestamp.normalize().cmp(&a.timestamp.normalize()));
    merged
}
