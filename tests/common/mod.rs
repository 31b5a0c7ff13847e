// Not every integration test binary uses every helper.
#![allow(dead_code)]

use chrono::NaiveDate;
use httpmock::MockServer;
use serde_json::{Value, json};
use telraam_rs::TelraamClient;
use url::Url;

pub const TEST_TOKEN: &str = "test-token";

pub fn client_for(server: &MockServer) -> TelraamClient {
    TelraamClient::builder()
        .api_key(TEST_TOKEN)
        .base_url(Url::parse(&format!("{}/v1/", server.base_url())).unwrap())
        .build()
        .unwrap()
}

pub fn traffic_row(segment_id: i64, date: &str) -> Value {
    json!({
        "segment_id": segment_id,
        "date": date,
        "interval": "hourly",
        "uptime": 0.75,
        "heavy": 3.5,
        "car": 42.0,
        "bike": 10.0,
        "pedestrian": 5.0,
        "heavy_lft": 1.5,
        "heavy_rgt": 2.0,
        "car_lft": 20.0,
        "car_rgt": 22.0,
        "bike_lft": 4.0,
        "bike_rgt": 6.0,
        "pedestrian_lft": 2.0,
        "pedestrian_rgt": 3.0,
        "v85": 32.5,
        "car_speed_hist_0to70plus": [10.0, 40.0, 30.0, 15.0, 5.0, 0.0, 0.0, 0.0]
    })
}

/// One row per calendar day in `[start, end]` inclusive, at 07:00 UTC.
pub fn daily_rows(segment_id: i64, start: NaiveDate, end: NaiveDate) -> Vec<Value> {
    let mut rows = Vec::new();
    let mut day = start;
    while day <= end {
        rows.push(traffic_row(segment_id, &format!("{day}T07:00:00.000Z")));
        day = day.succ_opt().unwrap();
    }
    rows
}

/// The exact JSON body the fetcher sends for one sub-interval.
pub fn traffic_request(id: &str, start: NaiveDate, end: NaiveDate) -> Value {
    json!({
        "id": id,
        "time_start": format!("{start} 00:00:00Z"),
        "time_end": format!("{end} 23:59:59Z"),
        "level": "segments",
        "format": "per-hour"
    })
}

pub fn report_body(rows: &[Value]) -> String {
    json!({ "status_code": 200, "message": "ok", "report": rows }).to_string()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
