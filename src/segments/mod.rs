//! Read-only directory of active Telraam segments.
//!
//! Backs the `"all"` segment selection in [`crate::download`] and the
//! nearest-segment lookup by coordinates.

pub(crate) mod wire;

use tracing::debug;
use wire::ActiveSegmentsEnvelope;

use crate::core::client::API_KEY_HEADER;
use crate::core::{TelraamClient, TelraamError};

/// IDs of all currently active segments, deduplicated.
///
/// # Errors
///
/// Unlike per-sub-interval report queries, a failed directory query is a
/// hard error: there is nothing to degrade to without the segment list.
pub async fn list_segments(client: &TelraamClient) -> Result<Vec<i64>, TelraamError> {
    let segments = query_active_segments(client).await?;
    let mut ids: Vec<i64> = segments.into_iter().map(|s| s.segment_id).collect();
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// IDs of all active segments within `radius_km` of `(lat, lon)`.
///
/// Distance is measured to the first coordinate of each segment's geometry,
/// as a great-circle (haversine) distance.
pub async fn list_segments_by_coordinates(
    client: &TelraamClient,
    lat: f64,
    lon: f64,
    radius_km: f64,
) -> Result<Vec<i64>, TelraamError> {
    let segments = query_active_segments(client).await?;
    let mut ids = Vec::new();
    for seg in segments {
        if let Some((seg_lon, seg_lat)) = seg.first_coordinate {
            if haversine_km(lat, lon, seg_lat, seg_lon) < radius_km {
                ids.push(seg.segment_id);
            }
        }
    }
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

pub(crate) struct ActiveSegment {
    pub segment_id: i64,
    /// `(lon, lat)` of the segment geometry's first point, GeoJSON order.
    pub first_coordinate: Option<(f64, f64)>,
}

async fn query_active_segments(
    client: &TelraamClient,
) -> Result<Vec<ActiveSegment>, TelraamError> {
    let url = client.base_url().join("segments/active_minimal")?;
    debug!(%url, "querying active segments");

    let resp = client
        .http()
        .get(url.clone())
        .header(API_KEY_HEADER, client.api_key())
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(TelraamError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let envelope: ActiveSegmentsEnvelope = resp
        .json()
        .await
        .map_err(|e| TelraamError::Data(format!("unparseable segments body: {e}")))?;

    Ok(envelope
        .features
        .into_iter()
        .map(|f| ActiveSegment {
            segment_id: f.properties.segment_id,
            first_coordinate: f
                .geometry
                .and_then(|g| g.coordinates.into_iter().next())
                .and_then(|line| line.into_iter().next())
                .and_then(|point| match point.as_slice() {
                    [lon, lat, ..] => Some((*lon, *lat)),
                    _ => None,
                }),
        })
        .collect())
}

/// Great-circle distance between two WGS84 points, in kilometers.
fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}
