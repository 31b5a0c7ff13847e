//! Per-sub-interval report retrieval and merging.
//!
//! One date range becomes several bounded requests (see [`crate::interval`]);
//! each request's outcome is recorded independently in a
//! [`crate::core::SegmentReport`], and [`assemble`] merges the ordered
//! outcomes into one report, skipping failed sub-intervals.

mod assemble;
mod fetch;
pub(crate) mod wire;

pub use assemble::assemble;
pub use fetch::fetch_segment_report;
