//! # vigil-stats
//!
//! Inspection statistics aggregation engine for Vigil.
//!
//! Turns raw, repeated inspection transactions into per-business-unit /
//! per-site / per-equipment-type completion and defect statistics for a
//! requested reporting cadence (daily, monthly, quarterly, annual).
//!
//! The engine is read-only and request-scoped: each aggregation issues a
//! small, bounded set of concurrent fetches against a [`source::RecordSource`],
//! then reduces and folds entirely in memory. Nothing is persisted, no
//! source record is mutated, and requests share no state, so arbitrarily
//! many aggregations may run concurrently against the same store.

pub mod aggregate;
pub mod error;
pub mod index;
pub mod mixer;
pub mod reduce;
pub mod source;
pub mod test_support;
pub mod window;

pub use aggregate::{AggregateRequest, StatsEngine};
pub use error::StatsError;
