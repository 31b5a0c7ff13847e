//! Core components of the `telraam-rs` client.
//!
//! This module contains the foundational building blocks of the library:
//! - The main [`TelraamClient`] and its builder.
//! - The primary [`TelraamError`] type.
//! - Shared data models like [`DateInterval`] and [`SegmentReport`].

/// The main client (`TelraamClient`), builder, and configuration.
pub mod client;
/// The primary error type (`TelraamError`) for the crate.
pub mod error;
/// Shared data models used across multiple modules.
pub mod models;

// convenient re-exports so most code can just `use crate::core::TelraamClient`
pub use client::{TelraamClient, TelraamClientBuilder};
pub use error::TelraamError;
pub use models::{
    AssembledReport, DateInterval, ReportFormat, ReportOutcome, SegmentReport, TrafficRow,
};
