//! In-memory record source for tests and examples.

use std::collections::BTreeSet;
use std::future::Future;

use vigil_core::entities::{Equipment, InspectionRecord};

use crate::source::RecordSource;

/// Scriptable in-memory [`RecordSource`].
///
/// Backs the integration suite: failures can be scripted per query so
/// degraded-source behavior is testable without a real document store.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    pub equipment: Vec<Equipment>,
    pub inspections: Vec<InspectionRecord>,
    /// Fail every equipment query.
    pub fail_equipment: bool,
    /// Fail every inspection query.
    pub fail_inspections: bool,
    /// Fail inspection queries filtered to one of these equipment types.
    pub fail_types: BTreeSet<String>,
}

impl RecordSource for MemorySource {
    fn equipment(
        &self,
        bu: &str,
        site: Option<&str>,
    ) -> impl Future<Output = anyhow::Result<Vec<Equipment>>> + Send {
        let result = if self.fail_equipment {
            Err(anyhow::anyhow!("equipment store unavailable"))
        } else {
            Ok(self
                .equipment
                .iter()
                .filter(|item| item.business_unit == bu)
                .filter(|item| site.is_none_or(|s| item.site.as_deref() == Some(s)))
                .cloned()
                .collect())
        };
        async move { result }
    }

    fn inspections(
        &self,
        bu: &str,
        site: Option<&str>,
        equipment_type: Option<&str>,
    ) -> impl Future<Output = anyhow::Result<Vec<InspectionRecord>>> + Send {
        // Raw transactions carry no trusted site, so the site filter is a
        // no-op here, exactly like the real store.
        let _ = site;
        let should_fail = self.fail_inspections
            || equipment_type.is_some_and(|t| self.fail_types.contains(t));
        let result = if should_fail {
            Err(anyhow::anyhow!("inspection store unavailable"))
        } else {
            Ok(self
                .inspections
                .iter()
                .filter(|record| record.business_unit == bu)
                .filter(|record| equipment_type.is_none_or(|t| record.equipment_type == t))
                .cloned()
                .collect())
        };
        async move { result }
    }
}
