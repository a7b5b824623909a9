//! Conversion between the in-session annotation set and the persisted
//! document format.
//!
//! Export flattens the whole set into one document, mapping display x
//! coordinates to canonical space by dividing by the radargram's `xscale`.
//! Import is the reverse path: it verifies the document belongs to the
//! session's radargram, multiplies x coordinates back up, and rebuilds
//! every feature through the normal creation path so names, colors and
//! validation issues are re-derived rather than trusted from the wire.

use chrono::{SecondsFormat, Utc};

use crate::format::document::{
    FeatureCollection, Geometry, PersistedDocument, WireFeature, WireProperties, SCHEMA_VERSION,
};
use crate::format::error::FormatError;
use crate::model::{AnnotationSet, ClassificationKind, RadargramMeta, Vertex};

/// Result of importing a document: the rebuilt set plus anything skipped.
#[derive(Debug)]
pub struct ImportReport {
    /// The annotation set rebuilt from the document.
    pub set: AnnotationSet,
    /// Features that could not be imported, with the reason.
    pub warnings: Vec<ImportWarning>,
}

/// A single feature skipped during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
    /// Index of the feature in the document's collection.
    pub feature_index: usize,
    /// Human-readable reason for the skip.
    pub message: String,
}

impl ImportWarning {
    fn new(feature_index: usize, message: impl Into<String>) -> Self {
        Self {
            feature_index,
            message: message.into(),
        }
    }
}

/// Flatten the annotation set into a persisted document.
///
/// Every vertex's x coordinate is divided by `meta.xscale` to recover
/// canonical space (a no-op at the default scale of 1). `date_modified` is
/// stamped with the current instant.
pub fn export(set: &AnnotationSet, meta: &RadargramMeta) -> PersistedDocument {
    let features = set
        .iter()
        .map(|feature| {
            let coordinates: Vec<(f64, f64)> = feature
                .vertices
                .iter()
                .map(|v| (v.x / meta.xscale, v.y))
                .collect();
            WireFeature::new(
                Geometry::line_string(&coordinates),
                WireProperties {
                    kind: Some(feature.kind.key().to_string()),
                    name: Some(feature.name().to_string()),
                    color: Some(feature.color().to_string()),
                    issues: feature.issues.iter().map(ToString::to_string).collect(),
                },
            )
        })
        .collect();

    log::info!(
        "exported {} features for {}",
        set.len(),
        meta.radar_key
    );

    PersistedDocument {
        schema_version: SCHEMA_VERSION,
        date_modified: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        width: meta.width,
        height: meta.height,
        difficulty: meta.difficulty,
        comment: meta.comment.clone(),
        radar_key: meta.radar_key.clone(),
        features: FeatureCollection::new(features),
    }
}

/// Rebuild an annotation set from a persisted document.
///
/// The document must belong to the session's radargram: `radar_key`,
/// `width` and `height` are checked before anything is read, and a mismatch
/// rejects the whole document with no partial state. Individual features
/// with non-line geometry or an unresolvable kind are skipped and reported,
/// while the rest of the document imports normally.
pub fn import(
    document: &PersistedDocument,
    meta: &RadargramMeta,
) -> Result<ImportReport, FormatError> {
    if document.radar_key != meta.radar_key {
        return Err(FormatError::schema_mismatch(
            "radar_key",
            &meta.radar_key,
            &document.radar_key,
        ));
    }
    if document.width != meta.width {
        return Err(FormatError::schema_mismatch(
            "width",
            meta.width,
            document.width,
        ));
    }
    if document.height != meta.height {
        return Err(FormatError::schema_mismatch(
            "height",
            meta.height,
            document.height,
        ));
    }

    let mut set = AnnotationSet::new();
    let mut warnings = Vec::new();

    for (index, wire) in document.features.features.iter().enumerate() {
        let Some(coordinates) = wire.geometry.as_line_string() else {
            warnings.push(ImportWarning::new(
                index,
                format!(
                    "unsupported geometry '{}', expected LineString",
                    wire.geometry.geometry_type
                ),
            ));
            continue;
        };

        let Some(kind) = resolve_kind(&wire.properties) else {
            warnings.push(ImportWarning::new(
                index,
                format!(
                    "could not resolve classification (kind: {:?}, name: {:?})",
                    wire.properties.kind, wire.properties.name
                ),
            ));
            continue;
        };

        let vertices: Vec<Vertex> = coordinates
            .iter()
            .map(|&(x, y)| Vertex::new(x * meta.xscale, y))
            .collect();
        set.add(kind, vertices);
    }

    log::info!(
        "imported {} features for {} ({} skipped, schema version {})",
        set.len(),
        meta.radar_key,
        warnings.len(),
        document.schema_version
    );
    for warning in &warnings {
        log::warn!(
            "skipped feature {}: {}",
            warning.feature_index,
            warning.message
        );
    }

    Ok(ImportReport { set, warnings })
}

/// Resolve a wire feature's classification.
///
/// The `kind` key wins when present. Legacy documents carry only the
/// display name, which is looked up against the registry as a fallback.
fn resolve_kind(properties: &WireProperties) -> Option<ClassificationKind> {
    if let Some(key) = &properties.kind {
        return ClassificationKind::from_key(key).ok();
    }
    properties
        .name
        .as_deref()
        .and_then(ClassificationKind::from_display_name)
}
