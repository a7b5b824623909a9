//! Named operations a host drawing surface applies to a session.
//!
//! Every interactive edit is an explicit command so a session can be driven
//! and unit-tested without a live rendering surface. Save, load and submit
//! are session methods rather than commands, since they return values the
//! host needs.

use crate::model::{ClassificationKind, Difficulty, FeatureId, Vertex};

/// One user action on the annotation session.
#[derive(Debug, Clone)]
pub enum Command {
    /// A new polyline was finished on the drawing surface.
    Draw { vertices: Vec<Vertex> },
    /// One vertex of an existing feature was dragged.
    MoveVertex {
        id: FeatureId,
        vertex: usize,
        to: Vertex,
    },
    /// A feature was deleted.
    Delete { id: FeatureId },
    /// A feature was assigned a different classification.
    Reclassify {
        id: FeatureId,
        kind: ClassificationKind,
    },
    /// A feature was cut in two at the given point.
    Split { id: FeatureId, x: f64, y: f64 },
    /// The classification for subsequently drawn features changed.
    SelectKind { kind: ClassificationKind },
    /// The radargram difficulty was chosen.
    SetDifficulty { difficulty: Difficulty },
    /// The annotator comment was edited.
    SetComment { comment: String },
}
