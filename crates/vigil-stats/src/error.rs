//! Aggregation error types for vigil-stats.
//!
//! Only source-unavailable conditions surface here. Everything else the
//! engine encounters (a failed mixer subtype fetch, an unparsable
//! timestamp, an unregistered asset) is recovered locally and logged.

use thiserror::Error;

/// Errors that fail an entire aggregation request.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The equipment registry fetch failed. Without the registry, `total`
    /// cannot be computed meaningfully, so the request fails.
    #[error("Equipment registry fetch failed: {0}")]
    Registry(#[source] anyhow::Error),

    /// The inspection transaction fetch failed.
    #[error("Inspection fetch failed: {0}")]
    Inspections(#[source] anyhow::Error),
}
