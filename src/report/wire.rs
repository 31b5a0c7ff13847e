use serde::{Deserialize, Serialize};

use crate::core::TrafficRow;

/// Request body for `POST /reports/traffic`.
#[derive(Debug, Serialize)]
pub(crate) struct TrafficRequest<'a> {
    pub id: &'a str,
    /// First instant of the interval's start day, e.g. `2020-01-01 00:00:00Z`.
    pub time_start: String,
    /// Last instant of the interval's end day, e.g. `2020-03-31 23:59:59Z`.
    pub time_end: String,
    pub level: &'a str,
    pub format: &'a str,
}

/// Response envelope; only the `report` field is interpreted.
#[derive(Debug, Deserialize)]
pub(crate) struct TrafficEnvelope {
    #[serde(default)]
    pub report: Option<Vec<TrafficRow>>,
}
