//! Named captures.
//!
//! A [`Capture`] pairs a [`Selector`] with a [`CaptureConfig`]. Excising a
//! capture detaches the selected subtree from the document and renders it as
//! simplified HTML. Captures run in declaration order against a shrinking
//! tree, so the order of a capture list matters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::clean::clean;
use crate::document::Document;
use crate::error::ExtractError;
use crate::selector::Selector;
use crate::stream::TagStream;
use crate::token::render;

/// Styling tags kept verbatim unless a capture says otherwise.
pub const RETAIN_TAGS_DEFAULT: &[&str] = &["b", "i", "strong", "em", "sup"];

/// Elements that start a new line.
pub const BLOCK_ELEMENTS_DEFAULT: &[&str] = &[
    // Table rows.
    "table",
    "thead",
    "tbody",
    "tr",
    // Figures and their captions.
    "figure",
    "figcaption",
    "img",
    "div",
    "hr",
    "br",
];

/// Elements that are separated from their neighbours by a space.
pub const SPACE_ELEMENTS_DEFAULT: &[&str] = &["td"];

fn set_of(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn default_retain_tags() -> BTreeSet<String> {
    set_of(RETAIN_TAGS_DEFAULT)
}

fn default_block_elements() -> BTreeSet<String> {
    set_of(BLOCK_ELEMENTS_DEFAULT)
}

fn default_space_elements() -> BTreeSet<String> {
    set_of(SPACE_ELEMENTS_DEFAULT)
}

/// Which parts of the selected HTML survive simplification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Tags kept under their own name.
    #[serde(default = "default_retain_tags")]
    pub retain_tags: BTreeSet<String>,

    /// Classes kept on the output. Elements carrying one become `span`s
    /// unless their tag is retained.
    #[serde(default)]
    pub retain_classes: BTreeSet<String>,

    /// Classes whose elements are kept, as `span`s, without the class itself.
    #[serde(default)]
    pub retain_elements_for_classes: BTreeSet<String>,

    /// Attributes kept on the output. Never contains `class`.
    #[serde(default)]
    pub retain_attributes: BTreeSet<String>,

    /// Elements that produce line breaks.
    #[serde(default = "default_block_elements")]
    pub block_elements: BTreeSet<String>,

    /// Elements that produce spaces.
    #[serde(default = "default_space_elements")]
    pub space_elements: BTreeSet<String>,

    /// Elements that produce unit delimiters.
    #[serde(default)]
    pub unit_tags: BTreeSet<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            retain_tags: default_retain_tags(),
            retain_classes: BTreeSet::new(),
            retain_elements_for_classes: BTreeSet::new(),
            retain_attributes: BTreeSet::new(),
            block_elements: default_block_elements(),
            space_elements: default_space_elements(),
            unit_tags: BTreeSet::new(),
        }
    }
}

fn collect<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl CaptureConfig {
    /// A configuration that retains nothing and produces no delimiters.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            retain_tags: BTreeSet::new(),
            retain_classes: BTreeSet::new(),
            retain_elements_for_classes: BTreeSet::new(),
            retain_attributes: BTreeSet::new(),
            block_elements: BTreeSet::new(),
            space_elements: BTreeSet::new(),
            unit_tags: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_retain_tags<I: IntoIterator<Item = S>, S: Into<String>>(mut self, tags: I) -> Self {
        self.retain_tags = collect(tags);
        self
    }

    #[must_use]
    pub fn with_retain_classes<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        classes: I,
    ) -> Self {
        self.retain_classes = collect(classes);
        self
    }

    #[must_use]
    pub fn with_retain_elements_for_classes<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        classes: I,
    ) -> Self {
        self.retain_elements_for_classes = collect(classes);
        self
    }

    #[must_use]
    pub fn with_retain_attributes<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        attributes: I,
    ) -> Self {
        self.retain_attributes = collect(attributes);
        self
    }

    #[must_use]
    pub fn with_block_elements<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        elements: I,
    ) -> Self {
        self.block_elements = collect(elements);
        self
    }

    #[must_use]
    pub fn with_space_elements<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        elements: I,
    ) -> Self {
        self.space_elements = collect(elements);
        self
    }

    #[must_use]
    pub fn with_unit_tags<I: IntoIterator<Item = S>, S: Into<String>>(mut self, tags: I) -> Self {
        self.unit_tags = collect(tags);
        self
    }

    /// Check construction invariants.
    ///
    /// # Errors
    /// Returns [`ExtractError::InvalidDefinition`] if `class` is listed in
    /// `retain_attributes`; classes are only retained through
    /// `retain_classes`.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.retain_attributes.contains("class") {
            return Err(ExtractError::InvalidDefinition(
                "`class` cannot be a retained attribute; use retain_classes".to_string(),
            ));
        }
        Ok(())
    }
}

/// A named field extracted from every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub name: String,
    pub selector: Selector,
    #[serde(flatten)]
    pub config: CaptureConfig,
}

impl Capture {
    /// A capture with the default configuration.
    pub fn new(name: impl Into<String>, selector: Selector) -> Self {
        Self {
            name: name.into(),
            selector,
            config: CaptureConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CaptureConfig) -> Self {
        self.config = config;
        self
    }

    /// Check the name, selector and configuration.
    ///
    /// # Errors
    /// Returns [`ExtractError::InvalidDefinition`] describing the first
    /// violated invariant.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.name.trim().is_empty() {
            return Err(ExtractError::InvalidDefinition(
                "capture name must not be empty".to_string(),
            ));
        }
        self.selector.validate().map_err(|error| {
            ExtractError::InvalidDefinition(format!("capture `{}`: {error}", self.name))
        })?;
        self.config.validate().map_err(|error| {
            ExtractError::InvalidDefinition(format!("capture `{}`: {error}", self.name))
        })
    }

    /// Select, detach and render this capture's subtree.
    ///
    /// Returns an empty string when an optional selector matches nothing.
    ///
    /// # Errors
    /// Propagates selector failures: ambiguity, or a required selector that
    /// matched nothing.
    pub fn excise(&self, doc: &mut Document) -> Result<String, ExtractError> {
        let Some(id) = self.selector.find_one(doc)? else {
            tracing::debug!(capture = %self.name, "optional capture matched nothing");
            return Ok(String::new());
        };
        let Some(subtree) = doc.excise(id) else {
            return Ok(String::new());
        };
        let tokens = TagStream::new(&self.config).tokenize(subtree);
        let html = render(&clean(tokens));
        tracing::debug!(capture = %self.name, bytes = html.len(), "excised capture");
        Ok(html)
    }
}
