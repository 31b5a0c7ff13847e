use tracing::warn;

use crate::core::{AssembledReport, ReportOutcome, SegmentReport};

/// Merge the ordered per-sub-interval reports into one report.
///
/// Rows from successful sub-intervals are concatenated in the order the
/// sub-intervals were generated, which keeps the result chronological as
/// long as each report's own rows are time-ordered (the provider's
/// behaviour). Failed sub-intervals are logged and skipped; rows on shared
/// boundary days are *not* deduplicated.
///
/// Returns `None` when every sub-interval failed — the caller's "no data
/// available" sentinel, distinct from a present-but-short report.
pub fn assemble(reports: Vec<SegmentReport>) -> Option<AssembledReport> {
    let total = reports.len();
    let mut rows = Vec::new();
    let mut succeeded = 0usize;

    for report in reports {
        match report.outcome {
            ReportOutcome::Success { rows: mut chunk_rows } => {
                succeeded += 1;
                rows.append(&mut chunk_rows);
            }
            ReportOutcome::Failure { status, reason } => {
                warn!(
                    interval = %report.interval,
                    status,
                    reason = %reason,
                    "sub-interval query failed; skipping"
                );
            }
        }
    }

    if succeeded == 0 {
        return None;
    }
    Some(AssembledReport {
        rows,
        succeeded,
        failed: total - succeeded,
    })
}
