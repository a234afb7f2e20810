//! The JSON file handed to the search front end.
//!
//! ```json
//! {
//!   "data": [{ "KEY": "ab/123", "meaning": "raven<br>crow" }],
//!   "metadata": { "layers": [["meaning"]] }
//! }
//! ```
//!
//! Validation is a hard gate: [`IndexArtifact::write`] refuses to write an
//! artifact that fails it.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::record::{KEY, Record};

/// Tags the search front end knows how to render inside a field value.
pub const ADMISSIBLE: &[&str] = &["b", "i", "strong", "em", "sup", "hr", "br", "span", "a"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Display grouping of field names.
    pub layers: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexArtifact {
    pub data: Vec<Record>,
    pub metadata: Metadata,
}

impl IndexArtifact {
    #[must_use]
    pub const fn new(data: Vec<Record>, layers: Vec<Vec<String>>) -> Self {
        Self {
            data,
            metadata: Metadata { layers },
        }
    }

    /// Every field name declared across the layers.
    ///
    /// # Errors
    /// Returns [`IndexError::InvalidDefinition`] if a name appears twice or
    /// is the reserved `KEY`.
    pub fn fields(&self) -> Result<BTreeSet<&str>, IndexError> {
        let mut fields = BTreeSet::new();
        for name in self.metadata.layers.iter().flatten() {
            if name == KEY {
                return Err(IndexError::InvalidDefinition(format!(
                    "`{KEY}` is reserved and cannot appear in a layer"
                )));
            }
            if !fields.insert(name.as_str()) {
                return Err(IndexError::InvalidDefinition(format!(
                    "field `{name}` appears in more than one layer"
                )));
            }
        }
        Ok(fields)
    }

    /// Check every record against the layers and the admissible tag set.
    ///
    /// # Errors
    /// Returns the first [`IndexError::SchemaViolation`] or
    /// [`IndexError::AdmissibilityViolation`] found, in data order.
    pub fn validate(&self) -> Result<(), IndexError> {
        let fields = self.fields()?;
        for record in &self.data {
            check_schema(record, &fields)?;
            check_admissible(record)?;
        }
        Ok(())
    }

    /// Serialize as JSON. Non-ASCII text is written as is; the output ends
    /// with a newline.
    ///
    /// # Errors
    /// Returns [`IndexError::Json`] if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<String, IndexError> {
        let mut json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        json.push('\n');
        Ok(json)
    }

    /// Validate, then write to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns validation failures before touching the file system, and
    /// [`IndexError::Io`] if writing fails.
    pub fn write(&self, path: &Path, pretty: bool) -> Result<(), IndexError> {
        self.validate()?;
        let json = self.to_json(pretty)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| IndexError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| IndexError::io(path, e))?;
        tracing::info!(
            path = %path.display(),
            records = self.data.len(),
            "wrote index artifact"
        );
        Ok(())
    }

    /// Load a previously written artifact. Does not validate it.
    ///
    /// # Errors
    /// Returns [`IndexError::Io`] or [`IndexError::Json`].
    pub fn read(path: &Path) -> Result<Self, IndexError> {
        let json = fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn check_schema(record: &Record, fields: &BTreeSet<&str>) -> Result<(), IndexError> {
    let present: BTreeSet<&str> = record.names().filter(|name| *name != KEY).collect();
    let has_key = record.key().is_some();
    if has_key && present == *fields {
        return Ok(());
    }

    let mut missing: Vec<String> = fields
        .difference(&present)
        .map(|name| (*name).to_string())
        .collect();
    if !has_key {
        missing.insert(0, KEY.to_string());
    }
    Err(IndexError::SchemaViolation {
        key: record.key().unwrap_or_default().to_string(),
        missing,
        unexpected: present
            .difference(fields)
            .map(|name| (*name).to_string())
            .collect(),
    })
}

fn check_admissible(record: &Record) -> Result<(), IndexError> {
    for (field, value) in record.iter().filter(|(name, _)| *name != KEY) {
        if let Some(tag) = tag_names(value).find(|tag| !ADMISSIBLE.contains(tag)) {
            return Err(IndexError::AdmissibilityViolation {
                key: record.key().unwrap_or_default().to_string(),
                field: field.to_string(),
                tag: tag.to_string(),
            });
        }
    }
    Ok(())
}

/// Names of opening tags in `html`: a `<`, optional whitespace, then a run
/// of ASCII letters and digits. Closing tags are skipped since they mirror an
/// opening tag.
fn tag_names(html: &str) -> impl Iterator<Item = &str> {
    html.match_indices('<').filter_map(move |(start, _)| {
        let rest = html[start + 1..].trim_start();
        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn record(key: &str, fields: &[(&str, &str)]) -> Record {
        let mut record = Record::new(key);
        for (name, value) in fields {
            record.push(*name, *value);
        }
        record
    }

    fn layers(names: &[&[&str]]) -> Vec<Vec<String>> {
        names
            .iter()
            .map(|layer| layer.iter().map(|name| (*name).to_string()).collect())
            .collect()
    }

    #[rstest]
    #[case("<b>x</b> <i>y</i>", vec!["b", "i"])]
    #[case("a <  span class=\"w\">x</span>", vec!["span"])]
    #[case("one<hr class=\"match-separator\">two<br>", vec!["hr", "br"])]
    #[case("1 &lt; 2 and </b>", vec![])]
    #[case("<div><h1>", vec!["div", "h1"])]
    fn finds_opening_tag_names(#[case] html: &str, #[case] expected: Vec<&str>) {
        assert_eq!(tag_names(html).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn valid_artifact_passes() {
        let artifact = IndexArtifact::new(
            vec![
                record("a", &[("meaning", "<b>x</b>"), ("wiki", "")]),
                record("b", &[("meaning", "y<br>z"), ("wiki", "<a href=\"u\">w</a>")]),
            ],
            layers(&[&["meaning"], &["wiki"]]),
        );
        assert!(artifact.validate().is_ok());
    }

    #[test]
    fn record_missing_a_field_is_a_schema_violation() {
        let artifact = IndexArtifact::new(
            vec![
                record("a", &[("meaning", "x"), ("footer", "f")]),
                record("b", &[("meaning", "y")]),
            ],
            layers(&[&["meaning", "footer"]]),
        );
        match artifact.validate().unwrap_err() {
            IndexError::SchemaViolation {
                key,
                missing,
                unexpected,
            } => {
                assert_eq!(key, "b");
                assert_eq!(missing, ["footer"]);
                assert!(unexpected.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extra_field_is_a_schema_violation() {
        let artifact = IndexArtifact::new(
            vec![record("a", &[("meaning", "x"), ("stray", "s")])],
            layers(&[&["meaning"]]),
        );
        assert!(matches!(
            artifact.validate(),
            Err(IndexError::SchemaViolation { ref unexpected, .. }) if unexpected == &["stray"]
        ));
    }

    #[test]
    fn inadmissible_tag_names_key_field_and_tag() {
        let artifact = IndexArtifact::new(
            vec![record("doc/1", &[("meaning", "ok <div>bad</div>")])],
            layers(&[&["meaning"]]),
        );
        let err = artifact.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "document `doc/1` field `meaning` contains inadmissible tag <div>"
        );
    }

    #[test]
    fn repeated_or_reserved_layer_names_are_rejected() {
        let twice = IndexArtifact::new(Vec::new(), layers(&[&["a"], &["a"]]));
        assert!(matches!(twice.validate(), Err(IndexError::InvalidDefinition(_))));

        let reserved = IndexArtifact::new(Vec::new(), layers(&[&["KEY"]]));
        assert!(matches!(reserved.validate(), Err(IndexError::InvalidDefinition(_))));
    }

    #[test]
    fn pretty_json_has_two_space_indent_raw_unicode_and_trailing_newline() {
        let artifact = IndexArtifact::new(vec![record("ⲁ", &[("f", "ⲃ")])], layers(&[&["f"]]));
        let json = artifact.to_json(true).unwrap();
        assert_eq!(
            json,
            "{\n  \"data\": [\n    {\n      \"KEY\": \"ⲁ\",\n      \"f\": \"ⲃ\"\n    }\n  ],\n  \"metadata\": {\n    \"layers\": [\n      [\n        \"f\"\n      ]\n    ]\n  }\n}\n"
        );
        assert_eq!(
            artifact.to_json(false).unwrap(),
            "{\"data\":[{\"KEY\":\"ⲁ\",\"f\":\"ⲃ\"}],\"metadata\":{\"layers\":[[\"f\"]]}}\n"
        );
    }

    #[test]
    fn write_refuses_invalid_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/index.json");
        let artifact = IndexArtifact::new(vec![record("a", &[])], layers(&[&["f"]]));
        assert!(artifact.write(&path, true).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn write_then_read_preserves_field_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/index.json");
        let artifact = IndexArtifact::new(
            vec![record("a", &[("z", "1"), ("a", "<i>2</i>")])],
            layers(&[&["z"], &["a"]]),
        );
        artifact.write(&path, true).unwrap();
        assert_eq!(IndexArtifact::read(&path).unwrap(), artifact);
    }
}
