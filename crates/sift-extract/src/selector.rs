//! Declarative element queries.
//!
//! A [`Selector`] matches elements by tag name, `id`, class token and exact
//! attribute values. All given criteria must hold. Matches come back in
//! document order, and only nodes still attached to the tree are searched.

use std::collections::BTreeMap;
use std::fmt;

use ego_tree::NodeId;
use scraper::Node;
use scraper::node::Element;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::ExtractError;

const fn default_required() -> bool {
    true
}

/// A query against a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// Element name, e.g. `body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Value of the `id` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// A class token the element must carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Other attributes, compared exactly.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    /// Whether matching nothing is an error.
    #[serde(default = "default_required")]
    pub required: bool,
}

impl Selector {
    fn empty() -> Self {
        Self {
            tag: None,
            id: None,
            class: None,
            attrs: BTreeMap::new(),
            required: true,
        }
    }

    /// Select elements by tag name.
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            tag: Some(name.into()),
            ..Self::empty()
        }
    }

    /// Select elements by `id`.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::empty()
        }
    }

    /// Select elements carrying a class.
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::empty()
        }
    }

    /// Additionally require an attribute value.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Allow the selector to match nothing.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Check construction invariants.
    ///
    /// # Errors
    /// Returns [`ExtractError::InvalidDefinition`] for a selector without any
    /// criteria, which would match every element.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.tag.is_none() && self.id.is_none() && self.class.is_none() && self.attrs.is_empty()
        {
            return Err(ExtractError::InvalidDefinition(
                "selector has no criteria and would match every element".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether an element satisfies every criterion.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        if self.tag.as_deref().is_some_and(|tag| element.name() != tag) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| element.attr("id") != Some(id)) {
            return false;
        }
        if let Some(class) = self.class.as_deref()
            && !element.classes().any(|c| c == class)
        {
            return false;
        }
        self.attrs
            .iter()
            .all(|(key, value)| element.attr(key) == Some(value.as_str()))
    }

    /// Every live element matching the query, in document order.
    ///
    /// # Errors
    /// Returns [`ExtractError::SelectorNotFound`] if the selector is required
    /// and nothing matches.
    pub fn find_all(&self, doc: &Document) -> Result<Vec<NodeId>, ExtractError> {
        let found: Vec<NodeId> = doc
            .root()
            .descendants()
            .filter(|node| matches!(node.value(), Node::Element(element) if self.matches(element)))
            .map(|node| node.id())
            .collect();
        if found.is_empty() && self.required {
            return Err(ExtractError::SelectorNotFound {
                selector: self.to_string(),
            });
        }
        Ok(found)
    }

    /// The single live element matching the query, if any.
    ///
    /// # Errors
    /// Returns [`ExtractError::SelectorAmbiguous`] when more than one element
    /// matches, whether or not the selector is required, and
    /// [`ExtractError::SelectorNotFound`] when a required selector matches
    /// nothing.
    pub fn find_one(&self, doc: &Document) -> Result<Option<NodeId>, ExtractError> {
        let found = self.find_all(doc)?;
        match found.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => Err(ExtractError::SelectorAmbiguous {
                selector: self.to_string(),
                count: found.len(),
            }),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(tag) = &self.tag {
            parts.push(format!("tag={tag}"));
        }
        if let Some(id) = &self.id {
            parts.push(format!("id={id}"));
        }
        if let Some(class) = &self.class {
            parts.push(format!("class={class}"));
        }
        for (key, value) in &self.attrs {
            parts.push(format!("{key}={value}"));
        }
        write!(f, "{{{}}}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <html><body>
          <div class="header nav" id="top">head</div>
          <div class="entry" data-kind="noun">one</div>
          <div class="entry" data-kind="verb">two</div>
          <p id="solo">p</p>
        </body></html>
    "#;

    fn names(doc: &Document, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| doc.node(*id))
            .filter_map(|node| match node.value() {
                Node::Element(element) => Some(element.name().to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn find_all_returns_matches_in_document_order() {
        let doc = Document::parse(PAGE);
        let found = Selector::tag("div").find_all(&doc).expect("divs exist");
        assert_eq!(names(&doc, &found), vec!["div", "div", "div"]);
    }

    #[test]
    fn class_matches_any_token() {
        let doc = Document::parse(PAGE);
        assert_eq!(Selector::class("nav").find_all(&doc).unwrap().len(), 1);
        assert_eq!(Selector::class("entry").find_all(&doc).unwrap().len(), 2);
    }

    #[test]
    fn all_criteria_must_hold() {
        let doc = Document::parse(PAGE);
        let selector = Selector::class("entry").with_attr("data-kind", "verb");
        assert_eq!(selector.find_all(&doc).unwrap().len(), 1);
        let selector = Selector::tag("p").with_attr("data-kind", "verb").optional();
        assert!(selector.find_all(&doc).unwrap().is_empty());
    }

    #[test]
    fn find_one_rejects_ambiguity_even_when_optional() {
        let doc = Document::parse(PAGE);
        let err = Selector::class("entry")
            .optional()
            .find_one(&doc)
            .expect_err("two matches");
        assert!(matches!(err, ExtractError::SelectorAmbiguous { count: 2, .. }));
    }

    #[test]
    fn required_selector_without_match_fails() {
        let doc = Document::parse(PAGE);
        let err = Selector::id("missing").find_one(&doc).expect_err("no match");
        match err {
            ExtractError::SelectorNotFound { selector } => assert_eq!(selector, "{id=missing}"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(Selector::id("missing").optional().find_one(&doc).unwrap().is_none());
    }

    #[test]
    fn removed_nodes_are_not_found_again() {
        let mut doc = Document::parse(PAGE);
        let selector = Selector::id("solo");
        let id = selector.find_one(&doc).unwrap().expect("p exists");
        doc.remove(id);
        assert!(selector.clone().optional().find_one(&doc).unwrap().is_none());
    }

    #[test]
    fn empty_selector_is_invalid() {
        let selector = Selector {
            tag: None,
            id: None,
            class: None,
            attrs: BTreeMap::new(),
            required: false,
        };
        assert!(selector.validate().is_err());
        assert!(Selector::tag("body").validate().is_ok());
    }

    #[test]
    fn deserializes_with_required_by_default() {
        let selector: Selector = serde_json::from_str(r#"{"id": "wiki"}"#).unwrap();
        assert_eq!(selector, Selector::id("wiki"));
        let selector: Selector =
            serde_json::from_str(r#"{"class": "ref", "required": false}"#).unwrap();
        assert_eq!(selector, Selector::class("ref").optional());
    }
}
