//! Directory walking for corpus sources.
//!
//! Every standard filter of the `ignore` crate is disabled: a corpus directory
//! is generated output, so `.gitignore` rules and hidden files carry no
//! meaning there. Entries are sorted by file name within each directory so
//! the resulting order is the same on every run and platform.

use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::IndexError;

/// Every file under `root` whose extension is `extension`, in walk order.
///
/// # Errors
/// Returns [`IndexError::Walk`] if `root` cannot be read.
pub fn find_documents(root: &Path, extension: &str) -> Result<Vec<PathBuf>, IndexError> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut paths = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == extension) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

/// The key of a document: its path relative to `root` without the extension,
/// joined with `/`.
#[must_use]
pub fn document_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
