//! Error types for document import/export.

use thiserror::Error;

/// Errors that reject a document as a whole.
///
/// Per-feature problems (unsupported geometry, unresolvable kind) do not
/// appear here; they skip the single feature and are reported as import
/// warnings instead.
#[derive(Error, Debug)]
pub enum FormatError {
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document belongs to a different radargram than the session
    #[error("document does not match this radargram: {field} is {found}, expected {expected}")]
    SchemaMismatch {
        /// Name of the mismatching field
        field: &'static str,
        /// Value the current session expects
        expected: String,
        /// Value found in the document
        found: String,
    },
}

impl FormatError {
    /// Create a schema mismatch error for one field.
    pub fn schema_mismatch(
        field: &'static str,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        Self::SchemaMismatch {
            field,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
