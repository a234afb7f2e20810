//! Parsed HTML documents.
//!
//! A [`Document`] owns its tree for the whole time it is processed. Removing
//! a subtree detaches it from its parent, so nothing searched from the root
//! afterwards can reach it again. Detached nodes stay in the arena until the
//! document is dropped.

use ego_tree::{NodeId, NodeRef};
use scraper::{Html, Node};

use crate::error::ExtractError;

/// An HTML document being reduced to captures.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a document, tolerating malformed markup the way browsers do.
    ///
    /// Parser diagnostics are logged at `debug` and otherwise ignored.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            tracing::debug!(
                count = html.errors.len(),
                first = %html.errors[0],
                "html parser reported recoverable errors"
            );
        }
        Self { html }
    }

    /// Parse a document, failing on the first parser diagnostic.
    ///
    /// # Errors
    /// Returns [`ExtractError::Parse`] when html5ever reports any error.
    pub fn parse_strict(source: &str) -> Result<Self, ExtractError> {
        let html = Html::parse_document(source);
        if let Some(first) = html.errors.first() {
            return Err(ExtractError::Parse(format!(
                "{first} ({} diagnostics)",
                html.errors.len()
            )));
        }
        Ok(Self { html })
    }

    /// Parse raw bytes, which must be UTF-8.
    ///
    /// # Errors
    /// Returns [`ExtractError::Parse`] for invalid UTF-8, or for any parser
    /// diagnostic when `strict` is set.
    pub fn from_bytes(bytes: &[u8], strict: bool) -> Result<Self, ExtractError> {
        let source = std::str::from_utf8(bytes)
            .map_err(|error| ExtractError::Parse(format!("input is not valid UTF-8: {error}")))?;
        if strict {
            Self::parse_strict(source)
        } else {
            Ok(Self::parse(source))
        }
    }

    /// The document node. Every live node descends from it.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_, Node> {
        self.html.tree.root()
    }

    /// Look up a node, detached or not.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.html.tree.get(id)
    }

    /// Whether a node is still reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let root = self.html.tree.root().id();
        self.node(id)
            .is_some_and(|node| node.id() == root || node.ancestors().any(|a| a.id() == root))
    }

    /// Detach a node and everything below it from the live tree.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Detach a node and hand back the detached subtree.
    ///
    /// The returned subtree can be read but no longer reached from the root,
    /// so a later selector can never return it a second time.
    pub fn excise(&mut self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.remove(id);
        self.node(id)
    }

    /// Remove every comment node. Returns how many were removed.
    pub fn strip_comments(&mut self) -> usize {
        let comments: Vec<NodeId> = self
            .root()
            .descendants()
            .filter(|node| matches!(node.value(), Node::Comment(_)))
            .map(|node| node.id())
            .collect();
        for id in &comments {
            self.remove(*id);
        }
        comments.len()
    }
}
