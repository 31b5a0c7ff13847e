//! Splitting a date range into provider-sized sub-intervals.
//!
//! The reports endpoint rejects time windows wider than 90 days, so a long
//! range has to be queried as a sequence of bounded chunks. The chunker is a
//! pure function; the inclusive-day wire rendering of each bound happens in
//! the fetcher.

use chrono::{Days, NaiveDate};

use crate::core::{DateInterval, TelraamError};

/// Split `[start, end]` into consecutive sub-intervals no wider than
/// `max_span_days`.
///
/// The sub-intervals cover the range contiguously and in ascending order:
/// the first starts at `start`, each next one starts where the previous
/// ended, and the last ends at `end` (clamped, so it may be shorter than
/// `max_span_days`). Because consecutive chunks share a boundary day and the
/// provider treats day bounds inclusively, rows on a seam day can appear in
/// both neighbouring reports; the assembler keeps such duplicates.
///
/// # Errors
///
/// Returns [`TelraamError::InvalidRange`] when `start > end` (the range is
/// never silently reordered) and [`TelraamError::InvalidParams`] when
/// `max_span_days` is not positive.
pub fn chunk(
    start: NaiveDate,
    end: NaiveDate,
    max_span_days: i64,
) -> Result<Vec<DateInterval>, TelraamError> {
    if start > end {
        return Err(TelraamError::InvalidRange { start, end });
    }
    if max_span_days <= 0 {
        return Err(TelraamError::InvalidParams(format!(
            "max_span_days must be positive, got {max_span_days}"
        )));
    }

    let mut out = Vec::new();
    let mut cursor = start;
    while (end - cursor).num_days() > max_span_days {
        let next = cursor + Days::new(max_span_days as u64);
        out.push(DateInterval::new(cursor, next));
        cursor = next;
    }
    out.push(DateInterval::new(cursor, end));
    Ok(out)
}
