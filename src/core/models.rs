use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/* ----- INTERVALS (shared by interval/, report/ and download/) ----- */

/// A closed range of calendar days, `start <= end`.
///
/// Constructed by [`crate::interval::chunk`]; both bounds are whole days so
/// the provider's inclusive-day wire encoding (`00:00:00` / `23:59:59`) can
/// be rendered without truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Width in days (`end - start`).
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl std::fmt::Display for DateInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.start, self.end)
    }
}

/// Granularity of the counts the provider reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    PerHour,
    PerDay,
}

impl ReportFormat {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ReportFormat::PerHour => "per-hour",
            ReportFormat::PerDay => "per-day",
        }
    }
}

/* ----- TRAFFIC ROWS (shared by report/ and dataset/) ----- */

/// One per-hour traffic observation as returned by the reports endpoint.
///
/// Only the fields the dataset tabulates are modelled; everything else the
/// provider sends (speed histograms, camera metadata, ...) is kept verbatim
/// in `extra` so rows stay mergeable without this crate interpreting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficRow {
    pub segment_id: i64,
    /// UTC timestamp of the observation bucket, e.g. `2020-01-01T07:00:00.000Z`.
    pub date: String,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub uptime: Option<f64>,
    #[serde(default)]
    pub heavy: Option<f64>,
    #[serde(default)]
    pub car: Option<f64>,
    #[serde(default)]
    pub bike: Option<f64>,
    #[serde(default)]
    pub pedestrian: Option<f64>,
    #[serde(default)]
    pub heavy_lft: Option<f64>,
    #[serde(default)]
    pub heavy_rgt: Option<f64>,
    #[serde(default)]
    pub car_lft: Option<f64>,
    #[serde(default)]
    pub car_rgt: Option<f64>,
    #[serde(default)]
    pub bike_lft: Option<f64>,
    #[serde(default)]
    pub bike_rgt: Option<f64>,
    #[serde(default)]
    pub pedestrian_lft: Option<f64>,
    #[serde(default)]
    pub pedestrian_rgt: Option<f64>,
    #[serde(default)]
    pub v85: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/* ----- REPORTS (shared by report/ and download/) ----- */

/// The outcome of one sub-interval request.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The provider answered with status 200 and a parseable report.
    Success {
        /// Report rows, in the provider's (chronological) order.
        rows: Vec<TrafficRow>,
    },
    /// The request failed; recorded, never raised.
    Failure {
        /// HTTP status, when the failure happened above the transport layer.
        status: Option<u16>,
        /// Human-readable reason, e.g. `403 Forbidden`.
        reason: String,
    },
}

/// One sub-interval's report, tagged with the interval it covers so failures
/// can be diagnosed after the fact.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentReport {
    pub interval: DateInterval,
    pub outcome: ReportOutcome,
}

impl SegmentReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ReportOutcome::Success { .. })
    }
}

/// The merge of all sub-interval reports for one segment and date range.
///
/// Invariant: `succeeded + failed` equals the number of sub-intervals the
/// range was chunked into. An `AssembledReport` always has `succeeded > 0`;
/// total failure is represented by absence (see [`crate::report::assemble`]).
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledReport {
    /// Concatenation of all successful sub-intervals' rows, in sub-interval
    /// order. Rows at chunk seams are not deduplicated.
    pub rows: Vec<TrafficRow>,
    pub succeeded: usize,
    pub failed: usize,
}
