//! Persisted document format and its import/export.
//!
//! The document is the unit of exchange with the backend: one JSON object
//! per radargram session, carrying metadata and a GeoJSON-style
//! FeatureCollection of LineStrings in canonical coordinate space.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use radat::format;
//!
//! let document = format::export(&set, &meta);
//! let report = format::import(&document, &meta)?;
//! ```

mod document;
mod error;
mod serializer;

pub use document::{
    FeatureCollection, Geometry, PersistedDocument, WireFeature, WireProperties, SCHEMA_VERSION,
};
pub use error::FormatError;
pub use serializer::{export, import, ImportReport, ImportWarning};
