//! Where documents come from.
//!
//! All reading happens here, once per document, before any document is
//! handed to the worker pool.

use std::fs;
use std::path::PathBuf;

use crate::error::IndexError;
use crate::walk::{document_key, find_documents};

/// Raw bytes of one document and its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub key: String,
    pub content: Vec<u8>,
}

impl SourceDocument {
    pub fn new(key: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
        }
    }
}

/// A corpus.
#[derive(Debug, Clone)]
pub enum Source {
    /// Every file with `extension` under `root`, keyed by relative path.
    Directory { root: PathBuf, extension: String },
    /// Documents produced elsewhere, keyed by their producer.
    Documents(Vec<SourceDocument>),
}

impl Source {
    pub fn directory(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self::Directory {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Read every document, in source order.
    ///
    /// # Errors
    /// Returns [`IndexError::Walk`] or [`IndexError::Io`] for directory
    /// sources that cannot be read.
    pub fn load(self) -> Result<Vec<SourceDocument>, IndexError> {
        match self {
            Self::Documents(documents) => Ok(documents),
            Self::Directory { root, extension } => {
                let paths = find_documents(&root, &extension)?;
                tracing::debug!(root = %root.display(), count = paths.len(), "found documents");
                paths
                    .into_iter()
                    .map(|path| {
                        let content = fs::read(&path).map_err(|e| IndexError::io(&path, e))?;
                        Ok(SourceDocument::new(document_key(&root, &path), content))
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn documents_pass_through_unchanged() {
        let docs = vec![
            SourceDocument::new("b", "<p>2</p>"),
            SourceDocument::new("a", "<p>1</p>"),
        ];
        assert_eq!(Source::Documents(docs.clone()).load().unwrap(), docs);
    }

    #[test]
    fn directory_documents_are_read_with_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("ab")).unwrap();
        fs::write(dir.path().join("ab/1.html"), "<p>ⲁ</p>").unwrap();

        let docs = Source::directory(dir.path(), "html").load().unwrap();
        assert_eq!(docs, vec![SourceDocument::new("ab/1", "<p>ⲁ</p>")]);
    }
}
