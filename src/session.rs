//! The interaction controller for one radargram annotation session.
//!
//! A [`Session`] owns the annotation set, the radargram metadata and the
//! submission backend, and is the single mutation path the host drawing
//! surface goes through. User actions arrive as [`Command`]s (or the
//! equivalent named methods); save, load and submit run the document
//! protocol. All recoverable errors additionally surface as a [`Notice`]
//! on one user-facing message channel.

use thiserror::Error;

use crate::client::{ClientError, SubmissionBackend, SubmitReceipt};
use crate::command::Command;
use crate::format::{self, FormatError, PersistedDocument};
use crate::model::{
    AnnotationSet, ClassificationKind, Difficulty, FeatureId, RadargramMeta, Vertex,
};
use crate::validate;

/// Styling of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A message for the user, with success/error styling.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub severity: Severity,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

/// Why the submit gate refused to let a submission through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateViolation {
    #[error("choose a difficulty before submitting")]
    DifficultyUnset,
    #[error("nothing to submit; draw at least one line first")]
    EmptySet,
    #[error("{count} line(s) have overhangs; fix them before submitting")]
    InvalidFeatures { count: usize },
}

/// Errors from session operations that go beyond a single notice.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Gate(#[from] GateViolation),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Outcome of [`Session::load_latest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A prior submission was fetched and replaced the annotation set.
    Loaded,
    /// No prior submission exists; the current set is untouched.
    NoPriorSubmission,
}

/// One open annotation session for one radargram.
pub struct Session {
    meta: RadargramMeta,
    store: AnnotationSet,
    backend: Box<dyn SubmissionBackend>,
    selected_kind: ClassificationKind,
    notice: Option<Notice>,
}

impl Session {
    /// Start a session for the given radargram.
    pub fn new(meta: RadargramMeta, backend: Box<dyn SubmissionBackend>) -> Self {
        Self {
            meta,
            store: AnnotationSet::new(),
            backend,
            selected_kind: ClassificationKind::all()[0],
            notice: None,
        }
    }

    /// The radargram metadata, including session edits to difficulty and
    /// comment.
    pub fn meta(&self) -> &RadargramMeta {
        &self.meta
    }

    /// The current annotation set.
    pub fn store(&self) -> &AnnotationSet {
        &self.store
    }

    /// The classification assigned to newly drawn features.
    pub fn selected_kind(&self) -> ClassificationKind {
        self.selected_kind
    }

    /// Whether there are changes not yet saved or submitted.
    pub fn has_unsaved_changes(&self) -> bool {
        self.store.is_dirty()
    }

    /// Take the pending user-facing message, if any.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Apply one user action.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Draw { vertices } => {
                self.draw(vertices);
            }
            Command::MoveVertex { id, vertex, to } => self.move_vertex(id, vertex, to),
            Command::Delete { id } => self.delete(id),
            Command::Reclassify { id, kind } => self.reclassify(id, kind),
            Command::Split { id, x, y } => {
                let _ = self.split(id, x, y);
            }
            Command::SelectKind { kind } => self.select_kind(kind),
            Command::SetDifficulty { difficulty } => self.set_difficulty(difficulty),
            Command::SetComment { comment } => self.set_comment(comment),
        }
    }

    /// Add a newly drawn feature with the selected kind and return its ID.
    pub fn draw(&mut self, vertices: Vec<Vertex>) -> FeatureId {
        let id = self.store.add(self.selected_kind, vertices);
        log::debug!(
            "drew feature {id} ({}, {} vertices)",
            self.selected_kind.key(),
            self.store.get(id).map_or(0, |f| f.vertices.len())
        );
        id
    }

    /// Move one vertex of a feature and re-validate that feature only.
    pub fn move_vertex(&mut self, id: FeatureId, vertex: usize, to: Vertex) {
        let Some(feature) = self.store.get_mut(id) else {
            log::warn!("move_vertex on unknown feature {id}");
            return;
        };
        let Some(slot) = feature.vertices.get_mut(vertex) else {
            log::warn!("move_vertex on feature {id}: no vertex {vertex}");
            return;
        };
        *slot = to;
        feature.revalidate();
        self.store.mark_dirty();
        log::debug!("moved vertex {vertex} of feature {id}");
    }

    /// Delete a feature. Its validation markers go with it.
    pub fn delete(&mut self, id: FeatureId) {
        if self.store.remove(id).is_some() {
            log::debug!("deleted feature {id}");
        } else {
            log::warn!("delete on unknown feature {id}");
        }
    }

    /// Change a feature's classification. No re-validation: the vertices
    /// did not move.
    pub fn reclassify(&mut self, id: FeatureId, kind: ClassificationKind) {
        let Some(feature) = self.store.get_mut(id) else {
            log::warn!("reclassify on unknown feature {id}");
            return;
        };
        feature.reclassify(kind);
        log::debug!("reclassified feature {id} as {}", kind.key());
    }

    /// Split a feature in two at the given point. Both children are
    /// validated on entry.
    pub fn split(&mut self, id: FeatureId, x: f64, y: f64) -> Option<(FeatureId, FeatureId)> {
        let children = self.store.split(id, x, y);
        if children.is_none() {
            log::warn!("split on unknown feature {id}");
        }
        children
    }

    /// Choose the classification for subsequently drawn features.
    pub fn select_kind(&mut self, kind: ClassificationKind) {
        self.selected_kind = kind;
    }

    /// Set the radargram difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.meta.difficulty = Some(difficulty);
    }

    /// Set the annotator comment.
    pub fn set_comment(&mut self, comment: String) {
        self.meta.comment = if comment.is_empty() {
            None
        } else {
            Some(comment)
        };
    }

    /// Export the session to a document and mark it saved.
    pub fn save(&mut self) -> PersistedDocument {
        let document = format::export(&self.store, &self.meta);
        self.store.clear_dirty();
        self.notice = Some(Notice::success("Annotations saved"));
        document
    }

    /// Fetch the latest prior submission and, if one exists, replace the
    /// annotation set with it. The document's difficulty and comment are
    /// adopted along with its features.
    ///
    /// An empty backend response means no prior submission and leaves the
    /// current set untouched. A document for a different radargram is
    /// rejected atomically.
    pub fn load_latest(&mut self) -> Result<LoadOutcome, SessionError> {
        let document = match self.backend.fetch_latest(&self.meta.radar_key) {
            Ok(Some(document)) => document,
            Ok(None) => {
                log::info!("no prior submission for {}", self.meta.radar_key);
                return Ok(LoadOutcome::NoPriorSubmission);
            }
            Err(error) => {
                self.notice = Some(Notice::error(format!(
                    "Could not fetch the latest submission: {error}"
                )));
                return Err(error.into());
            }
        };

        match format::import(&document, &self.meta) {
            Ok(report) => {
                self.notice = Some(if report.warnings.is_empty() {
                    Notice::success("Loaded your previous submission")
                } else {
                    Notice::error(format!(
                        "Loaded your previous submission, but skipped {} feature(s)",
                        report.warnings.len()
                    ))
                });
                self.store = report.set;
                self.meta.difficulty = document.difficulty;
                self.meta.comment = document.comment;
                Ok(LoadOutcome::Loaded)
            }
            Err(error) => {
                self.notice = Some(Notice::error(error.to_string()));
                Err(error.into())
            }
        }
    }

    /// Check whether a submission would be allowed right now.
    ///
    /// Validation runs fresh across all features without touching their
    /// stored issues. Exposed separately so a host can enable or disable
    /// its submit affordance, including while a submission is in flight.
    pub fn submit_gate(&self) -> Result<(), GateViolation> {
        if self.meta.difficulty.is_none() {
            return Err(GateViolation::DifficultyUnset);
        }
        if self.store.is_empty() {
            return Err(GateViolation::EmptySet);
        }
        let invalid = self
            .store
            .iter()
            .filter(|f| !validate::validate(&f.vertices).is_empty())
            .count();
        if invalid > 0 {
            return Err(GateViolation::InvalidFeatures { count: invalid });
        }
        Ok(())
    }

    /// Run the submit gate and, if it passes, transmit the session.
    ///
    /// On success the dirty flag clears. On any failure the annotation set
    /// and dirty flag stay untouched, so the user can fix the cause (log
    /// in again, resolve overhangs) and retry.
    pub fn submit(&mut self) -> Result<SubmitReceipt, SessionError> {
        if let Err(violation) = self.submit_gate() {
            self.notice = Some(Notice::error(violation.to_string()));
            return Err(violation.into());
        }

        let document = format::export(&self.store, &self.meta);
        match self.backend.submit(&document) {
            Ok(receipt) => {
                self.store.clear_dirty();
                log::info!("submitted {}: {}", self.meta.radar_key, receipt.message);
                self.notice = Some(Notice::success(receipt.message.clone()));
                Ok(receipt)
            }
            Err(error) => {
                self.notice = Some(Notice::error(error.to_string()));
                Err(error.into())
            }
        }
    }
}
