//! High-level download surface: one, many, or all segments over a date
//! range, with chunked fetching, skip-and-continue failure handling, and
//! optional CSV persistence.

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use crate::core::{ReportFormat, ReportOutcome, SegmentReport, TelraamClient, TelraamError};
use crate::dataset::SegmentDataset;
use crate::{interval, report, segments};

/// Which segments a download covers.
#[derive(Debug, Clone)]
pub enum SegmentSelection {
    /// Every active segment, expanded via the segment directory at run time.
    All,
    /// An explicit list of segment IDs.
    Ids(Vec<String>),
}

impl SegmentSelection {
    pub fn one(id: impl Into<String>) -> Self {
        Self::Ids(vec![id.into()])
    }
}

impl From<&str> for SegmentSelection {
    /// `"all"` selects every active segment, anything else is a single ID.
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::one(s)
        }
    }
}

/// Coarse outcome classification, for callers that present partial failures
/// differently from total ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    /// Every segment and every sub-interval produced data.
    Complete,
    /// A dataset was produced, but some segments or sub-intervals failed.
    Partial,
    /// Nothing succeeded; no dataset.
    Failed,
}

/// A segment for which no data could be retrieved.
#[derive(Debug, Clone)]
pub struct SegmentFailure {
    pub segment_id: String,
    /// HTTP status of the last recorded sub-interval failure, when there was
    /// one. A 403 here means the API key was rejected.
    pub status: Option<u16>,
    pub reason: String,
}

/// The result of a [`DownloadBuilder::run`].
#[derive(Debug)]
pub struct DownloadOutcome {
    /// The merged dataset, absent when no segment produced any rows.
    pub dataset: Option<SegmentDataset>,
    pub succeeded_segments: usize,
    pub failed_segments: Vec<SegmentFailure>,
    pub sub_intervals_succeeded: usize,
    pub sub_intervals_failed: usize,
}

impl DownloadOutcome {
    pub fn status(&self) -> DownloadStatus {
        match &self.dataset {
            None => DownloadStatus::Failed,
            Some(_) if self.failed_segments.is_empty() && self.sub_intervals_failed == 0 => {
                DownloadStatus::Complete
            }
            Some(_) => DownloadStatus::Partial,
        }
    }

    /// True when any recorded failure was an HTTP 403.
    pub fn auth_rejected(&self) -> bool {
        self.failed_segments
            .iter()
            .any(|f| f.status == Some(403))
    }
}

/// A builder for downloading traffic data for one or more segments.
///
/// Long date ranges are transparently split into ≤90-day sub-intervals (the
/// provider's limit), fetched one request per sub-interval, and merged back
/// into a single chronologically ordered dataset. Failures local to one
/// sub-interval or one segment are logged and skipped; only a structurally
/// invalid request or a directory-query failure aborts the whole download.
pub struct DownloadBuilder {
    client: TelraamClient,
    selection: SegmentSelection,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl DownloadBuilder {
    /// Creates a new `DownloadBuilder` covering all active segments.
    #[must_use]
    pub fn new(client: &TelraamClient) -> Self {
        Self {
            client: client.clone(),
            selection: SegmentSelection::All,
            start: None,
            end: None,
            format: ReportFormat::default(),
            output_path: None,
        }
    }

    /// Restrict the download to a single segment.
    #[must_use]
    pub fn segment(mut self, id: impl Into<String>) -> Self {
        self.selection = SegmentSelection::one(id);
        self
    }

    /// Restrict the download to an explicit list of segments.
    #[must_use]
    pub fn segments<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = SegmentSelection::Ids(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Use a [`SegmentSelection`] directly.
    #[must_use]
    pub fn selection(mut self, selection: SegmentSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Set the inclusive date range to download.
    ///
    /// Defaults are resolved when [`run`](Self::run) is called, never
    /// earlier: the end date defaults to today, the start date to one week
    /// before the end date.
    #[must_use]
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Set only the start date (see [`between`](Self::between) for defaults).
    #[must_use]
    pub fn start_date(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Set only the end date (see [`between`](Self::between) for defaults).
    #[must_use]
    pub fn end_date(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Report counts per hour or per day. (Default: per hour)
    #[must_use]
    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Also persist the merged dataset to this path as CSV.
    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Execute the download.
    ///
    /// Segments are fetched concurrently; within a segment, sub-intervals
    /// are fetched sequentially and re-merged in chronological order at
    /// assembly. Dropping the returned future cancels between requests,
    /// leaving remaining sub-intervals un-issued.
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted date range, a failed segment
    /// directory query (with `SegmentSelection::All`), a malformed row
    /// timestamp, or a failed write to `output_path`. Per-sub-interval and
    /// per-segment query failures do *not* error; they are reported in the
    /// returned [`DownloadOutcome`].
    pub async fn run(self) -> Result<DownloadOutcome, TelraamError> {
        // Defaults are resolved here, at call time.
        let end = self.end.unwrap_or_else(|| Utc::now().date_naive());
        let start = self.start.unwrap_or(end - Days::new(7));
        let chunks = interval::chunk(start, end, self.client.max_chunk_days())?;

        let segment_ids: Vec<String> = match &self.selection {
            SegmentSelection::All => segments::list_segments(&self.client)
                .await?
                .into_iter()
                .map(|id| id.to_string())
                .collect(),
            SegmentSelection::Ids(ids) => ids.clone(),
        };
        info!(
            n_segments = segment_ids.len(),
            n_sub_intervals = chunks.len(),
            %start,
            %end,
            "downloading traffic reports"
        );

        let fetches = segment_ids
            .iter()
            .map(|id| fetch_one_segment(&self.client, id, &chunks, self.format));
        let outcomes = join_all(fetches)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        let mut datasets = Vec::new();
        let mut failed_segments = Vec::new();
        let mut sub_ok = 0usize;
        let mut sub_failed = 0usize;
        for outcome in outcomes {
            sub_ok += outcome.chunks_succeeded;
            sub_failed += outcome.chunks_failed;
            match outcome.dataset {
                Some(ds) => datasets.push(ds),
                None => {
                    let (status, reason) = outcome
                        .last_failure
                        .unwrap_or((None, "no rows returned".to_string()));
                    warn!(
                        segment_id = %outcome.segment_id,
                        status,
                        reason = %reason,
                        "segment skipped"
                    );
                    failed_segments.push(SegmentFailure {
                        segment_id: outcome.segment_id,
                        status,
                        reason,
                    });
                }
            }
        }

        let succeeded_segments = datasets.len();
        let dataset = SegmentDataset::merge(datasets).filter(|d| !d.is_empty());

        if let (Some(ds), Some(path)) = (&dataset, &self.output_path) {
            ds.persist(path)?;
        }

        Ok(DownloadOutcome {
            dataset,
            succeeded_segments,
            failed_segments,
            sub_intervals_succeeded: sub_ok,
            sub_intervals_failed: sub_failed,
        })
    }
}

struct SegmentOutcome {
    segment_id: String,
    dataset: Option<SegmentDataset>,
    chunks_succeeded: usize,
    chunks_failed: usize,
    last_failure: Option<(Option<u16>, String)>,
}

/// Fetch all sub-intervals for one segment (sequentially), assemble, and
/// tabulate. "No data" is reported as an absent dataset, not an error.
async fn fetch_one_segment(
    client: &TelraamClient,
    segment_id: &str,
    chunks: &[crate::core::DateInterval],
    format: ReportFormat,
) -> Result<SegmentOutcome, TelraamError> {
    let mut reports: Vec<SegmentReport> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        reports.push(report::fetch_segment_report(client, segment_id, chunk, format).await?);
    }

    let chunks_succeeded = reports.iter().filter(|r| r.is_success()).count();
    let chunks_failed = reports.len() - chunks_succeeded;
    let last_failure = reports
        .iter()
        .filter_map(|r| match &r.outcome {
            ReportOutcome::Failure { status, reason } => Some((*status, reason.clone())),
            ReportOutcome::Success { .. } => None,
        })
        .last();

    let dataset = match report::assemble(reports) {
        Some(assembled) if !assembled.rows.is_empty() => {
            Some(SegmentDataset::build(&assembled)?)
        }
        // Either every sub-interval failed, or they succeeded with no rows.
        _ => None,
    };

    Ok(SegmentOutcome {
        segment_id: segment_id.to_string(),
        dataset,
        chunks_succeeded,
        chunks_failed,
        last_failure,
    })
}

/// Download one segment's traffic counts over a date range.
///
/// Returns `Ok(None)` when no data was available (every sub-interval failed,
/// or none of them returned rows). `start`/`end` default like
/// [`DownloadBuilder::between`].
///
/// # Errors
///
/// See [`DownloadBuilder::run`].
pub async fn download_one_segment(
    client: &TelraamClient,
    segment_id: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    output_path: Option<&Path>,
) -> Result<Option<SegmentDataset>, TelraamError> {
    download_segments(client, SegmentSelection::one(segment_id), start, end, output_path).await
}

/// Download traffic counts for a selection of segments, merged into one
/// dataset. Per-segment failures are logged and skipped; `Ok(None)` means no
/// segment produced data.
///
/// # Errors
///
/// See [`DownloadBuilder::run`].
pub async fn download_segments(
    client: &TelraamClient,
    selection: SegmentSelection,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    output_path: Option<&Path>,
) -> Result<Option<SegmentDataset>, TelraamError> {
    let mut builder = DownloadBuilder::new(client).selection(selection);
    if let Some(s) = start {
        builder = builder.start_date(s);
    }
    if let Some(e) = end {
        builder = builder.end_date(e);
    }
    if let Some(p) = output_path {
        builder = builder.output_path(p);
    }
    Ok(builder.run().await?.dataset)
}
