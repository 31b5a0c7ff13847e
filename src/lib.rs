//! telraam-rs: ergonomic client for the Telraam traffic-counting API.
//!
//! The Telraam reports endpoint refuses time windows longer than 90 days, so
//! downloading a long date range means paginating it into bounded
//! sub-intervals, issuing one request per sub-interval, and stitching the
//! partial results back together. This crate does that plumbing:
//!
//! - [`interval::chunk`] splits a date range into ≤90-day sub-intervals.
//! - [`report`] fetches one traffic report per sub-interval and merges the
//!   outcomes, skipping failed sub-intervals instead of aborting.
//! - [`dataset::SegmentDataset`] turns the merged report into a
//!   date-ordered table and can persist it as CSV.
//! - [`download`] ties it all together for one, many, or all segments.

pub mod core;

pub mod dataset;
pub mod download;
pub mod interval;
pub mod report;
pub mod segments;

pub use crate::core::client::{TelraamClient, TelraamClientBuilder};
pub use crate::core::error::TelraamError;
pub use crate::core::models::{
    AssembledReport, DateInterval, ReportFormat, ReportOutcome, SegmentReport, TrafficRow,
};
pub use dataset::{DatasetRow, SegmentDataset};
pub use download::{
    DownloadBuilder, DownloadOutcome, DownloadStatus, SegmentFailure, SegmentSelection,
    download_one_segment, download_segments,
};
