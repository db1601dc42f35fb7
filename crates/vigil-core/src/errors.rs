//! Cross-cutting error types for Vigil.
//!
//! Domain-specific errors (e.g., `ConfigError`, `StatsError`) are defined in
//! their respective crates. This module holds only the errors that can be
//! raised by the core types themselves.

use thiserror::Error;

/// Errors that can be raised by the core domain types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A reporting cadence string did not match any known cadence.
    #[error("Unknown cadence '{value}' (expected daily, monthly, quarterly, or annual)")]
    InvalidCadence { value: String },
}
