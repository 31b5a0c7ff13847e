mod common;

use common::{client_for, date, report_body, traffic_row};
use httpmock::Method::POST;
use httpmock::MockServer;
use telraam_rs::report::{assemble, fetch_segment_report};
use telraam_rs::{DateInterval, ReportFormat, ReportOutcome, SegmentReport, TrafficRow};

fn row(segment_id: i64, ts: &str) -> TrafficRow {
    serde_json::from_value(traffic_row(segment_id, ts)).unwrap()
}

fn success(interval: DateInterval, rows: Vec<TrafficRow>) -> SegmentReport {
    SegmentReport {
        interval,
        outcome: ReportOutcome::Success { rows },
    }
}

fn failure(interval: DateInterval, status: u16) -> SegmentReport {
    SegmentReport {
        interval,
        outcome: ReportOutcome::Failure {
            status: Some(status),
            reason: format!("{status} error"),
        },
    }
}

/* ---------------- fetch ---------------- */

#[tokio::test]
async fn fetch_sends_one_inclusive_day_request_and_parses_rows() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/reports/traffic")
            .header("x-api-key", common::TEST_TOKEN)
            .json_body(serde_json::json!({
                "id": "1003073114",
                "time_start": "2020-01-01 00:00:00Z",
                "time_end": "2020-03-31 23:59:59Z",
                "level": "segments",
                "format": "per-hour"
            }));
        then.status(200)
            .header("content-type", "application/json")
            .body(report_body(&[
                traffic_row(1003073114, "2020-01-01T07:00:00.000Z"),
                traffic_row(1003073114, "2020-01-01T08:00:00.000Z"),
            ]));
    });

    let client = client_for(&server);
    let interval = DateInterval::new(date(2020, 1, 1), date(2020, 3, 31));
    let report = fetch_segment_report(&client, "1003073114", &interval, ReportFormat::PerHour)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(report.interval, interval);
    match report.outcome {
        ReportOutcome::Success { rows } => {
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].segment_id, 1003073114);
            assert_eq!(rows[0].date, "2020-01-01T07:00:00.000Z");
            assert_eq!(rows[0].car, Some(42.0));
            // unmodelled provider fields survive opaquely
            assert!(rows[0].extra.contains_key("car_speed_hist_0to70plus"));
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_sends_per_day_format_when_asked() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/reports/traffic")
            .json_body(serde_json::json!({
                "id": "1003073114",
                "time_start": "2020-01-01 00:00:00Z",
                "time_end": "2020-01-31 23:59:59Z",
                "level": "segments",
                "format": "per-day"
            }));
        then.status(200)
            .header("content-type", "application/json")
            .body(report_body(&[traffic_row(1003073114, "2020-01-01T00:00:00.000Z")]));
    });

    let client = client_for(&server);
    let interval = DateInterval::new(date(2020, 1, 1), date(2020, 1, 31));
    let report = fetch_segment_report(&client, "1003073114", &interval, ReportFormat::PerDay)
        .await
        .unwrap();

    mock.assert();
    assert!(report.is_success());
}

#[tokio::test]
async fn fetch_records_non_200_as_failure_instead_of_raising() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/reports/traffic");
        then.status(500).body("boom");
    });

    let client = client_for(&server);
    let interval = DateInterval::new(date(2020, 1, 1), date(2020, 1, 2));
    let report = fetch_segment_report(&client, "42", &interval, ReportFormat::PerHour)
        .await
        .unwrap();

    mock.assert();
    match report.outcome {
        ReportOutcome::Failure { status, reason } => {
            assert_eq!(status, Some(500));
            assert!(reason.starts_with("500"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_preserves_auth_rejection_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/reports/traffic");
        then.status(403).body("forbidden");
    });

    let client = client_for(&server);
    let interval = DateInterval::new(date(2020, 1, 1), date(2020, 1, 2));
    let report = fetch_segment_report(&client, "42", &interval, ReportFormat::PerHour)
        .await
        .unwrap();

    match report.outcome {
        ReportOutcome::Failure { status, .. } => assert_eq!(status, Some(403)),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_records_unparseable_body_as_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/reports/traffic");
        then.status(200).body("not json");
    });

    let client = client_for(&server);
    let interval = DateInterval::new(date(2020, 1, 1), date(2020, 1, 2));
    let report = fetch_segment_report(&client, "42", &interval, ReportFormat::PerHour)
        .await
        .unwrap();

    match report.outcome {
        ReportOutcome::Failure { status, reason } => {
            assert_eq!(status, Some(200));
            assert!(reason.contains("unparseable"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

/* ---------------- assemble ---------------- */

#[test]
fn assemble_preserves_order_and_skips_failures() {
    let i1 = DateInterval::new(date(2020, 1, 1), date(2020, 3, 31));
    let i2 = DateInterval::new(date(2020, 3, 31), date(2020, 6, 29));
    let i3 = DateInterval::new(date(2020, 6, 29), date(2020, 7, 15));

    let r1 = vec![row(7, "2020-01-01T07:00:00.000Z"), row(7, "2020-01-02T07:00:00.000Z")];
    let r3 = vec![row(7, "2020-07-01T07:00:00.000Z")];

    let assembled = assemble(vec![
        success(i1, r1.clone()),
        failure(i2, 500),
        success(i3, r3.clone()),
    ])
    .unwrap();

    let mut expected = r1;
    expected.extend(r3);
    assert_eq!(assembled.rows, expected);
    assert_eq!(assembled.succeeded, 2);
    assert_eq!(assembled.failed, 1);
}

#[test]
fn assemble_returns_none_when_every_sub_interval_failed() {
    let i1 = DateInterval::new(date(2020, 1, 1), date(2020, 3, 31));
    let i2 = DateInterval::new(date(2020, 3, 31), date(2020, 4, 15));

    assert!(assemble(vec![failure(i1, 500), failure(i2, 503)]).is_none());
}

#[test]
fn assemble_conserves_row_counts() {
    let i1 = DateInterval::new(date(2020, 1, 1), date(2020, 3, 31));
    let i2 = DateInterval::new(date(2020, 3, 31), date(2020, 4, 15));

    let r1 = vec![
        row(7, "2020-01-01T07:00:00.000Z"),
        row(7, "2020-01-01T08:00:00.000Z"),
        row(7, "2020-01-01T09:00:00.000Z"),
    ];
    let r2 = vec![row(7, "2020-04-01T07:00:00.000Z")];

    let assembled = assemble(vec![success(i1, r1), success(i2, r2)]).unwrap();
    assert_eq!(assembled.rows.len(), 4);
    assert_eq!(assembled.succeeded, 2);
    assert_eq!(assembled.failed, 0);
}

#[test]
fn assemble_keeps_duplicate_boundary_rows() {
    // Consecutive chunks share a boundary day; the provider can answer the
    // same row to both queries. Duplicates are kept, not merged away.
    let i1 = DateInterval::new(date(2020, 1, 1), date(2020, 3, 31));
    let i2 = DateInterval::new(date(2020, 3, 31), date(2020, 4, 15));
    let seam = row(7, "2020-03-31T07:00:00.000Z");

    let assembled = assemble(vec![
        success(i1, vec![seam.clone()]),
        success(i2, vec![seam.clone()]),
    ])
    .unwrap();
    assert_eq!(assembled.rows, vec![seam.clone(), seam]);
}

#[test]
fn assemble_of_empty_successes_is_present_but_empty() {
    // "every sub-interval failed" (None) is distinct from "succeeded with
    // zero rows" (Some with empty rows); the no-data decision for the latter
    // belongs to the caller.
    let i1 = DateInterval::new(date(2020, 1, 1), date(2020, 1, 2));
    let assembled = assemble(vec![success(i1, vec![])]).unwrap();
    assert!(assembled.rows.is_empty());
    assert_eq!(assembled.succeeded, 1);
}
