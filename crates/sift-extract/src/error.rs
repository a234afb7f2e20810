//! Extraction error types for sift-extract.

/// Errors raised while parsing a document or running selectors and captures
/// against it.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The input could not be turned into a document tree.
    #[error("parse failed: {0}")]
    Parse(String),

    /// A selector matched several elements where at most one was expected.
    #[error("selector {selector} is ambiguous: matched {count} elements")]
    SelectorAmbiguous { selector: String, count: usize },

    /// A required selector matched nothing.
    #[error("selector {selector} is required but matched nothing")]
    SelectorNotFound { selector: String },

    /// A capture or selector definition breaks a construction invariant.
    #[error("invalid definition: {0}")]
    InvalidDefinition(String),
}
