//! Tabular, date-indexed materialization of assembled reports.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AssembledReport, TelraamError, TrafficRow};

/// One record of a [`SegmentDataset`]: the scalar columns of a
/// [`TrafficRow`] with the timestamp parsed and stripped of its zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    /// Observation bucket timestamp. The provider sends UTC-qualified
    /// timestamps; the zone designator is stripped, not converted, since
    /// every value originates from the same zone. Lossy by design, to keep
    /// downstream tabular tooling happy.
    pub date: NaiveDateTime,
    pub segment_id: i64,
    pub uptime: Option<f64>,
    pub heavy: Option<f64>,
    pub car: Option<f64>,
    pub bike: Option<f64>,
    pub pedestrian: Option<f64>,
    pub heavy_lft: Option<f64>,
    pub heavy_rgt: Option<f64>,
    pub car_lft: Option<f64>,
    pub car_rgt: Option<f64>,
    pub bike_lft: Option<f64>,
    pub bike_rgt: Option<f64>,
    pub pedestrian_lft: Option<f64>,
    pub pedestrian_rgt: Option<f64>,
    pub v85: Option<f64>,
}

/// A date-ordered table of traffic observations.
///
/// Built once from an [`AssembledReport`] and not mutated afterwards; the
/// only subsequent operation is the optional [`persist`](Self::persist).
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDataset {
    rows: Vec<DatasetRow>,
}

impl SegmentDataset {
    /// Tabulate an assembled report.
    ///
    /// The timestamp becomes the table's ordering key: rows are stably
    /// sorted by it, so duplicate timestamps (possible at chunk seams) keep
    /// their assembly order and are retained. Pure transform; no network.
    ///
    /// # Errors
    ///
    /// Returns [`TelraamError::Data`] when a row carries a timestamp that
    /// cannot be parsed.
    pub fn build(report: &AssembledReport) -> Result<Self, TelraamError> {
        let mut rows = report
            .rows
            .iter()
            .map(tabulate_row)
            .collect::<Result<Vec<_>, _>>()?;
        rows.sort_by_key(|r| r.date);
        Ok(Self { rows })
    }

    /// Concatenate several datasets in the given order (e.g. one per
    /// segment). Rows are not re-sorted across datasets.
    pub fn merge(datasets: Vec<SegmentDataset>) -> Option<SegmentDataset> {
        if datasets.is_empty() {
            return None;
        }
        let rows = datasets.into_iter().flat_map(|d| d.rows).collect();
        Some(SegmentDataset { rows })
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`TelraamError::Io`] or [`TelraamError::Csv`] when the target
    /// path is unwritable or serialization fails.
    pub fn persist(&self, path: &Path) -> Result<(), TelraamError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), n_rows = self.rows.len(), "dataset written");
        Ok(())
    }
}

fn tabulate_row(row: &TrafficRow) -> Result<DatasetRow, TelraamError> {
    Ok(DatasetRow {
        date: parse_naive_utc(&row.date)?,
        segment_id: row.segment_id,
        uptime: row.uptime,
        heavy: row.heavy,
        car: row.car,
        bike: row.bike,
        pedestrian: row.pedestrian,
        heavy_lft: row.heavy_lft,
        heavy_rgt: row.heavy_rgt,
        car_lft: row.car_lft,
        car_rgt: row.car_rgt,
        bike_lft: row.bike_lft,
        bike_rgt: row.bike_rgt,
        pedestrian_lft: row.pedestrian_lft,
        pedestrian_rgt: row.pedestrian_rgt,
        v85: row.v85,
    })
}

/// Strip the zone designator off a provider timestamp.
fn parse_naive_utc(s: &str) -> Result<NaiveDateTime, TelraamError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    // Older payloads render timestamps as "YYYY-MM-DD HH:MM:SSZ".
    NaiveDateTime::parse_from_str(s.trim_end_matches('Z'), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| TelraamError::Data(format!("unparseable row timestamp {s:?}: {e}")))
}
