//! `[[index]]` tables.
//!
//! ```toml
//! [[index]]
//! name = "crum"
//! source = "crum/data/output/html"
//! output = "site/crum/index.json"
//! layers = [["meaning", "appendix"]]
//!
//! [[index.extract]]
//! class = "header"
//! required = false
//!
//! [[index.capture]]
//! name = "meaning"
//! selector = { id = "meaning" }
//! retain_classes = ["dialect", "spelling"]
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

use figment::value::magic::RelativePathBuf;
use serde::{Deserialize, Serialize};
use sift_extract::{Capture, Selector};

use crate::error::ConfigError;

fn default_extension() -> String {
    "html".to_string()
}

/// One index to build: where documents come from, what to strip, what to
/// capture and where the artifact goes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexDefinition {
    pub name: String,

    /// Directory walked for input documents. Relative paths resolve against
    /// the directory of the file that declared them.
    pub source: RelativePathBuf,

    /// Extension of input documents, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Where the JSON artifact is written.
    pub output: RelativePathBuf,

    /// Noise removed from every document before any capture runs.
    #[serde(default)]
    pub extract: Vec<Selector>,

    /// Fields, excised in this order.
    #[serde(default, rename = "capture")]
    pub captures: Vec<Capture>,

    /// Display grouping of capture names. Empty means one layer holding every
    /// capture in order.
    #[serde(default)]
    pub layers: Vec<Vec<String>>,

    /// Fail a document on any HTML parse diagnostic.
    #[serde(default)]
    pub strict: bool,
}

impl IndexDefinition {
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.source.relative()
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output.relative()
    }

    /// The declared layers, or a single layer of every capture name.
    #[must_use]
    pub fn effective_layers(&self) -> Vec<Vec<String>> {
        if self.layers.is_empty() {
            vec![self.captures.iter().map(|c| c.name.clone()).collect()]
        } else {
            self.layers.clone()
        }
    }

    /// Check what can be checked without reading any document.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: String| ConfigError::InvalidValue {
            field: format!("index.{}.{field}", self.name),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "index.name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(invalid(
                "extension",
                format!("expected a bare extension, got '{}'", self.extension),
            ));
        }
        for selector in &self.extract {
            selector
                .validate()
                .map_err(|error| invalid("extract", error.to_string()))?;
        }
        let mut names = BTreeSet::new();
        for capture in &self.captures {
            capture
                .validate()
                .map_err(|error| invalid("capture", error.to_string()))?;
            if !names.insert(capture.name.as_str()) {
                return Err(invalid(
                    "capture",
                    format!("capture '{}' is declared twice", capture.name),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn definition(captures: &[&str]) -> IndexDefinition {
        IndexDefinition {
            name: "crum".to_string(),
            source: PathBuf::from("html").into(),
            extension: default_extension(),
            output: PathBuf::from("index.json").into(),
            extract: Vec::new(),
            captures: captures
                .iter()
                .map(|name| Capture::new(*name, Selector::id(*name)))
                .collect(),
            layers: Vec::new(),
            strict: false,
        }
    }

    #[test]
    fn layers_default_to_all_captures_in_order() {
        let def = definition(&["meaning", "appendix"]);
        assert_eq!(
            def.effective_layers(),
            vec![vec!["meaning".to_string(), "appendix".to_string()]]
        );
    }

    #[test]
    fn duplicate_capture_names_are_rejected() {
        let err = definition(&["a", "a"]).validate().unwrap_err();
        assert!(err.to_string().contains("index.crum.capture"));
    }

    #[test]
    fn dotted_extension_is_rejected() {
        let mut def = definition(&["a"]);
        def.extension = ".html".to_string();
        assert!(def.validate().is_err());
    }

    #[test]
    fn invalid_extract_selector_is_rejected() {
        let mut def = definition(&["a"]);
        def.extract.push(Selector {
            tag: None,
            id: None,
            class: None,
            attrs: std::collections::BTreeMap::new(),
            required: false,
        });
        assert!(def.validate().is_err());
    }
}
