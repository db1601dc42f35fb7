//! Read-only adapter seam over the equipment and transaction stores.

use std::future::Future;

use vigil_core::entities::{Equipment, InspectionRecord};

/// Read-only queries the aggregation engine issues against the document
/// store.
///
/// Implementations must tolerate concurrent calls; the engine fetches
/// concurrently and never writes. Errors surface as `anyhow::Error` so
/// heterogeneous backends can report their native failures.
pub trait RecordSource: Sync {
    /// All registered equipment for a business unit, optionally restricted
    /// to one site.
    fn equipment(
        &self,
        bu: &str,
        site: Option<&str>,
    ) -> impl Future<Output = anyhow::Result<Vec<Equipment>>> + Send;

    /// All inspection transactions for a business unit, optionally filtered
    /// by site and/or equipment type.
    fn inspections(
        &self,
        bu: &str,
        site: Option<&str>,
        equipment_type: Option<&str>,
    ) -> impl Future<Output = anyhow::Result<Vec<InspectionRecord>>> + Send;
}
