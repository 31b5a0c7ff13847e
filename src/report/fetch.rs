use tracing::debug;

use crate::core::client::API_KEY_HEADER;
use crate::core::{
    DateInterval, ReportFormat, ReportOutcome, SegmentReport, TelraamClient, TelraamError,
};
use crate::report::wire::{TrafficEnvelope, TrafficRequest};

/// Fetch the traffic report for one segment over one sub-interval.
///
/// Issues exactly one `POST /reports/traffic` and judges the response by its
/// status code: only an exact 200 is treated as healthy. Anything else —
/// a non-200 status, a connection-level error, an unparseable body — is
/// recorded as a [`ReportOutcome::Failure`] rather than returned as an
/// error, so one bad sub-interval never aborts the surrounding download.
/// Retries, if any, are the transport's business; none happen here.
pub async fn fetch_segment_report(
    client: &TelraamClient,
    segment_id: &str,
    interval: &DateInterval,
    format: ReportFormat,
) -> Result<SegmentReport, TelraamError> {
    let url = client.base_url().join("reports/traffic")?;
    let body = TrafficRequest {
        id: segment_id,
        // The provider treats both bounds as inclusive calendar days.
        time_start: format!("{} 00:00:00Z", interval.start),
        time_end: format!("{} 23:59:59Z", interval.end),
        level: "segments",
        format: format.as_str(),
    };
    debug!(segment_id, %interval, %url, "querying traffic report");

    let resp = match client
        .http()
        .post(url)
        .header(API_KEY_HEADER, client.api_key())
        .json(&body)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            return Ok(failure(interval, None, format!("request failed: {e}")));
        }
    };

    let status = resp.status();
    if status.as_u16() != 200 {
        let reason = status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string();
        return Ok(failure(
            interval,
            Some(status.as_u16()),
            format!("{} {reason}", status.as_u16()),
        ));
    }

    let text = match resp.text().await {
        Ok(t) => t,
        Err(e) => {
            return Ok(failure(interval, None, format!("body read failed: {e}")));
        }
    };
    let envelope: TrafficEnvelope = match serde_json::from_str(&text) {
        Ok(env) => env,
        Err(e) => {
            return Ok(failure(
                interval,
                Some(200),
                format!("unparseable report body: {e}"),
            ));
        }
    };

    let rows = envelope.report.unwrap_or_default();
    debug!(segment_id, %interval, n_rows = rows.len(), "report received");
    Ok(SegmentReport {
        interval: *interval,
        outcome: ReportOutcome::Success { rows },
    })
}

fn failure(interval: &DateInterval, status: Option<u16>, reason: String) -> SegmentReport {
    SegmentReport {
        interval: *interval,
        outcome: ReportOutcome::Failure { status, reason },
    }
}
