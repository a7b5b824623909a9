//! Drawn polyline features.

use serde::{Deserialize, Serialize};

use crate::model::ClassificationKind;
use crate::validate::{self, ValidationIssue};

/// Unique identifier for a feature within one session.
pub type FeatureId = u32;

/// A 2D point in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One digitized polyline with its classification and validity state.
///
/// Vertices are insertion-ordered; the order defines the traversal
/// direction the validator checks against. Name and color are never stored:
/// they derive from the kind, so they cannot drift when the feature is
/// reclassified.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Unique identifier within the session.
    pub id: FeatureId,
    /// Ordered vertex sequence in display coordinates.
    pub vertices: Vec<Vertex>,
    /// Current classification.
    pub kind: ClassificationKind,
    /// Issues found by the most recent validation. Not refreshed on every
    /// mutation; callers re-validate where the workflow requires it.
    pub issues: Vec<ValidationIssue>,
}

impl Feature {
    /// Create a feature and validate its vertices.
    ///
    /// This is the single creation path for drawn and imported features, so
    /// every new feature starts with fresh issues.
    pub fn new(id: FeatureId, kind: ClassificationKind, vertices: Vec<Vertex>) -> Self {
        let issues = validate::validate(&vertices);
        Self {
            id,
            vertices,
            kind,
            issues,
        }
    }

    /// Display name derived from the current kind.
    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// Render color derived from the current kind.
    pub fn color(&self) -> &'static str {
        self.kind.color()
    }

    /// Change the classification. Vertices and issues are untouched; the
    /// derived name and color follow the new kind immediately.
    pub fn reclassify(&mut self, kind: ClassificationKind) {
        self.kind = kind;
    }

    /// Recompute validation issues from the current vertices.
    pub fn revalidate(&mut self) {
        self.issues = validate::validate(&self.vertices);
    }

    /// Whether the most recent validation found no issues.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}
