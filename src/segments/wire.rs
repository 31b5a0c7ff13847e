use serde::Deserialize;

/// GeoJSON-shaped response of `GET /segments/active_minimal`.
#[derive(Debug, Deserialize)]
pub(crate) struct ActiveSegmentsEnvelope {
    #[serde(default)]
    pub features: Vec<SegmentFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SegmentFeature {
    pub properties: SegmentProperties,
    #[serde(default)]
    pub geometry: Option<SegmentGeometry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SegmentProperties {
    // Older API revisions call this field `id`.
    #[serde(alias = "id")]
    pub segment_id: i64,
}

/// MultiLineString geometry; points are `[lon, lat]` pairs.
#[derive(Debug, Deserialize)]
pub(crate) struct SegmentGeometry {
    #[serde(default)]
    pub coordinates: Vec<Vec<Vec<f64>>>,
}
