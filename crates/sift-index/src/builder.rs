//! Turning a corpus into an [`IndexArtifact`].
//!
//! Each document goes through the same fixed pipeline on a single worker:
//! parse, drop comments, remove every match of every extract selector, then
//! excise the captures in declaration order. The resulting records keep the
//! order of the source, and the finished artifact is validated before it is
//! returned.

use std::collections::BTreeSet;

use sift_extract::{Capture, Document, ExtractError, Selector};

use crate::artifact::IndexArtifact;
use crate::error::{IndexError, Stage};
use crate::pool::map_in_order;
use crate::record::{KEY, Record};
use crate::source::SourceDocument;

#[derive(Debug, Clone)]
pub struct Indexer {
    extract: Vec<Selector>,
    captures: Vec<Capture>,
    layers: Vec<Vec<String>>,
    strict: bool,
    threads: usize,
}

impl Indexer {
    /// Check the definition and build an indexer.
    ///
    /// Empty `layers` means a single layer holding every capture in order.
    /// Otherwise every capture must appear in exactly one layer and every
    /// layer entry must name a capture.
    ///
    /// # Errors
    /// Returns [`IndexError::InvalidDefinition`] describing the first
    /// problem.
    pub fn new(
        extract: Vec<Selector>,
        captures: Vec<Capture>,
        layers: Vec<Vec<String>>,
    ) -> Result<Self, IndexError> {
        for selector in &extract {
            selector.validate().map_err(|error| {
                IndexError::InvalidDefinition(format!("extract selector {selector}: {error}"))
            })?;
        }

        let mut names = BTreeSet::new();
        for capture in &captures {
            capture
                .validate()
                .map_err(|error| IndexError::InvalidDefinition(error.to_string()))?;
            if capture.name == KEY {
                return Err(IndexError::InvalidDefinition(format!(
                    "capture name `{KEY}` is reserved"
                )));
            }
            if !names.insert(capture.name.as_str()) {
                return Err(IndexError::InvalidDefinition(format!(
                    "capture `{}` is declared twice",
                    capture.name
                )));
            }
        }

        let layers = if layers.is_empty() {
            vec![captures.iter().map(|c| c.name.clone()).collect()]
        } else {
            layers
        };
        let mut layered = BTreeSet::new();
        for name in layers.iter().flatten() {
            if !names.contains(name.as_str()) {
                return Err(IndexError::InvalidDefinition(format!(
                    "layer entry `{name}` is not a capture"
                )));
            }
            if !layered.insert(name.as_str()) {
                return Err(IndexError::InvalidDefinition(format!(
                    "`{name}` appears in more than one layer"
                )));
            }
        }
        if let Some(unlayered) = names.difference(&layered).next() {
            return Err(IndexError::InvalidDefinition(format!(
                "capture `{unlayered}` is not in any layer"
            )));
        }

        Ok(Self {
            extract,
            captures,
            layers,
            strict: false,
            threads: 0,
        })
    }

    /// Fail documents on any HTML parse diagnostic.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Worker count: `0` for one per core, `1` for sequential.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[must_use]
    pub fn layers(&self) -> &[Vec<String>] {
        &self.layers
    }

    #[must_use]
    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    /// Run the per-document pipeline.
    ///
    /// # Errors
    /// Returns [`IndexError::Document`] naming `key` and the failing stage.
    pub fn process(&self, key: &str, content: &[u8]) -> Result<Record, IndexError> {
        let fail = |stage: Stage| {
            move |error: ExtractError| IndexError::Document {
                key: key.to_string(),
                stage,
                error,
            }
        };

        let mut doc = Document::from_bytes(content, self.strict).map_err(fail(Stage::Parse))?;
        let comments = doc.strip_comments();

        let mut removed = 0;
        for selector in &self.extract {
            for id in selector.find_all(&doc).map_err(fail(Stage::Extract))? {
                doc.remove(id);
                removed += 1;
            }
        }

        let mut record = Record::new(key);
        for capture in &self.captures {
            let value = capture
                .excise(&mut doc)
                .map_err(fail(Stage::Capture(capture.name.clone())))?;
            record.push(capture.name.clone(), value);
        }

        tracing::debug!(key, comments, removed, "processed document");
        Ok(record)
    }

    /// Process every document and assemble a validated artifact.
    ///
    /// `on_done` is called with each key as its document finishes, from
    /// whichever worker processed it.
    ///
    /// # Errors
    /// Returns the first document failure, or a validation failure of the
    /// assembled artifact.
    pub fn build<F>(
        &self,
        documents: &[SourceDocument],
        on_done: F,
    ) -> Result<IndexArtifact, IndexError>
    where
        F: Fn(&str) + Sync + Send,
    {
        let data = map_in_order(documents, self.threads, |doc| {
            let record = self.process(&doc.key, &doc.content)?;
            on_done(&doc.key);
            Ok(record)
        })?;

        let artifact = IndexArtifact::new(data, self.layers.clone());
        artifact.validate()?;
        tracing::info!(
            documents = artifact.data.len(),
            captures = self.captures.len(),
            "built index"
        );
        Ok(artifact)
    }
}
