//! Wire types for the persisted annotation document.
//!
//! One document captures a full annotation session for one radargram: the
//! session metadata plus a GeoJSON-style FeatureCollection of LineStrings
//! with coordinates in canonical (unscaled) pixel space.
//!
//! # Versioning
//!
//! `schema_version` is 1 for documents written by this crate. Documents
//! written before versioning existed carry no field and deserialize as 0;
//! those may also lack the `kind` property on features, in which case the
//! importer falls back to a display-name lookup.

use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

/// Current document schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// A full annotation session as exchanged with the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedDocument {
    /// Document schema version; 0 means a legacy document written before
    /// the field existed.
    #[serde(default)]
    pub schema_version: u32,
    /// ISO-8601 timestamp of the export.
    pub date_modified: String,
    /// Canonical pixel width of the radargram.
    pub width: u32,
    /// Canonical pixel height of the radargram.
    pub height: u32,
    /// Difficulty chosen by the annotator, if any.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Free-form annotator comment, if any.
    #[serde(default)]
    pub comment: Option<String>,
    /// Radargram this document belongs to.
    pub radar_key: String,
    /// The digitized lines.
    pub features: FeatureCollection,
}

/// GeoJSON-style feature collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<WireFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<WireFeature>) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            features,
        }
    }
}

/// One feature in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: WireProperties,
}

impl WireFeature {
    pub fn new(geometry: Geometry, properties: WireProperties) -> Self {
        Self {
            feature_type: "Feature".to_string(),
            geometry,
            properties,
        }
    }
}

/// Feature geometry with coordinates kept as raw JSON.
///
/// Coordinates stay untyped so that a document containing a non-line
/// geometry still parses as a whole; the importer skips the offending
/// feature instead of rejecting the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: serde_json::Value,
}

impl Geometry {
    /// Build a LineString geometry from canonical `(x, y)` pairs.
    pub fn line_string(coordinates: &[(f64, f64)]) -> Self {
        let coordinates = serde_json::to_value(coordinates)
            .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));
        Self {
            geometry_type: "LineString".to_string(),
            coordinates,
        }
    }

    /// Interpret this geometry as a LineString, if it is one.
    pub fn as_line_string(&self) -> Option<Vec<(f64, f64)>> {
        if self.geometry_type != "LineString" {
            return None;
        }
        serde_json::from_value(self.coordinates.clone()).ok()
    }
}

/// Properties carried by each wire feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireProperties {
    /// Stable classification key. Absent on legacy documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Display name at export time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Render color at export time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Validation issues at export time, as human-readable strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_string_roundtrip() {
        let geometry = Geometry::line_string(&[(1.0, 2.0), (3.5, 4.0)]);
        assert_eq!(geometry.geometry_type, "LineString");
        assert_eq!(
            geometry.as_line_string(),
            Some(vec![(1.0, 2.0), (3.5, 4.0)])
        );
    }

    #[test]
    fn test_non_line_geometry_is_not_a_line() {
        let json = r#"{"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}"#;
        let geometry: Geometry = serde_json::from_str(json).unwrap();
        assert!(geometry.as_line_string().is_none());
    }

    #[test]
    fn test_legacy_document_defaults() {
        // A document written before schema_version and kind existed.
        let json = r##"{
            "date_modified": "2024-05-10T09:30:00.000Z",
            "width": 100,
            "height": 50,
            "radar_key": "etonbreen-20240503-DAT_0012_A1_1",
            "features": {
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "LineString", "coordinates": [[0.0, 1.0], [2.0, 3.0]]},
                    "properties": {"name": "Glacier bed", "color": "#d62728"}
                }]
            }
        }"##;
        let document: PersistedDocument = serde_json::from_str(json).unwrap();
        assert_eq!(document.schema_version, 0);
        assert!(document.difficulty.is_none());
        assert!(document.features.features[0].properties.kind.is_none());
    }
}
