//! # vigil-core
//!
//! Core domain types for Vigil inspection statistics.
//!
//! This crate provides the foundational types shared across all Vigil crates:
//! - Equipment and inspection record entities with ingestion normalization
//! - Tagged answer values and reporting cadence enums
//! - Timestamp normalization across heterogeneous source shapes
//! - Statistics wire types consumed by the reporting dashboards
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod stats;
pub mod timestamp;
