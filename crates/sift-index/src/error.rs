//! Index error types for sift-index.

use std::fmt;
use std::path::PathBuf;

use sift_extract::ExtractError;

/// Where in the per-document pipeline a failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Extract,
    Capture(String),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => f.write_str("parse"),
            Self::Extract => f.write_str("extract"),
            Self::Capture(name) => write!(f, "capture `{name}`"),
        }
    }
}

/// Errors that abort an index build. No partial index is ever written.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// A single document failed somewhere between parsing and its last
    /// capture.
    #[error("document `{key}` failed at {stage}: {error}")]
    Document {
        key: String,
        stage: Stage,
        error: ExtractError,
    },

    /// A record's fields differ from the fields declared by the layers.
    #[error(
        "document `{key}` does not match the index schema (missing: {missing:?}, unexpected: {unexpected:?})"
    )]
    SchemaViolation {
        key: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// A field value uses a tag the search front end does not render.
    #[error("document `{key}` field `{field}` contains inadmissible tag <{tag}>")]
    AdmissibilityViolation {
        key: String,
        field: String,
        tag: String,
    },

    /// The index definition itself is unusable.
    #[error("invalid index definition: {0}")]
    InvalidDefinition(String),

    /// Reading a document or writing the artifact failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Walking a source directory failed.
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Encoding or decoding the artifact failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool could not be started.
    #[error("worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The document key this error is about, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Document { key, .. }
            | Self::SchemaViolation { key, .. }
            | Self::AdmissibilityViolation { key, .. } => Some(key),
            _ => None,
        }
    }
}
