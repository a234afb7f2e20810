//! Tokenization of an HTML subtree.
//!
//! Walks a subtree depth first and flattens it into [`Token`]s according to a
//! [`CaptureConfig`]. Tags are kept, renamed to `span`, or dropped in favour
//! of their content. Unit, block and space elements bracket their content
//! with the matching delimiter on both sides. The output is noisy on purpose;
//! [`crate::clean`] collapses it afterwards.

use std::collections::BTreeMap;

use ego_tree::NodeRef;
use scraper::Node;
use scraper::node::Element;

use crate::capture::CaptureConfig;
use crate::token::Token;

/// Produces the raw token sequence for one subtree.
pub struct TagStream<'c> {
    config: &'c CaptureConfig,
    tokens: Vec<Token>,
}

impl<'c> TagStream<'c> {
    #[must_use]
    pub const fn new(config: &'c CaptureConfig) -> Self {
        Self {
            config,
            tokens: Vec::new(),
        }
    }

    /// Tokenize `root` and everything below it.
    ///
    /// The root goes through the same element rules as its descendants.
    #[must_use]
    pub fn tokenize(mut self, root: NodeRef<'_, Node>) -> Vec<Token> {
        self.push_node(root);
        self.tokens
    }

    fn push_node(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(text) => self.push_text(text),
            Node::Element(element) => self.push_element(node, element),
            Node::Document | Node::Fragment => self.push_children(node),
            Node::Doctype(_) | Node::Comment(_) | Node::ProcessingInstruction(_) => {}
        }
    }

    fn push_children(&mut self, node: NodeRef<'_, Node>) {
        for child in node.children() {
            self.push_node(child);
        }
    }

    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        if raw.chars().all(char::is_whitespace) {
            self.tokens.push(Token::space());
            return;
        }
        if raw.starts_with(char::is_whitespace) {
            self.tokens.push(Token::space());
        }
        self.tokens
            .push(Token::Text(raw.split_whitespace().collect::<Vec<_>>().join(" ")));
        if raw.ends_with(char::is_whitespace) {
            self.tokens.push(Token::space());
        }
    }

    fn push_element(&mut self, node: NodeRef<'_, Node>, element: &Element) {
        let name = element.name();
        let delimiter = self.delimiter_for(name);
        if let Some(token) = &delimiter {
            self.tokens.push(token.clone());
        }

        let attrs = self.retained_attrs(element);
        let keep_element = self.config.retain_tags.contains(name)
            || !attrs.is_empty()
            || element
                .classes()
                .any(|class| self.config.retain_elements_for_classes.contains(class));

        if keep_element {
            let tag = if self.config.retain_tags.contains(name) {
                name
            } else {
                "span"
            };
            self.tokens.push(Token::Open {
                name: tag.to_string(),
                attrs,
            });
            self.push_children(node);
            self.tokens.push(Token::close(tag));
        } else {
            self.push_children(node);
        }

        if let Some(token) = delimiter {
            self.tokens.push(token);
        }
    }

    fn delimiter_for(&self, name: &str) -> Option<Token> {
        if self.config.unit_tags.contains(name) {
            Some(Token::UnitBreak)
        } else if self.config.block_elements.contains(name) {
            Some(Token::LineBreak)
        } else if self.config.space_elements.contains(name) {
            Some(Token::space())
        } else {
            None
        }
    }

    fn retained_attrs(&self, element: &Element) -> BTreeMap<String, String> {
        let mut attrs: BTreeMap<String, String> = self
            .config
            .retain_attributes
            .iter()
            .filter_map(|key| {
                element
                    .attr(key)
                    .filter(|value| !value.is_empty())
                    .map(|value| (key.clone(), value.to_string()))
            })
            .collect();

        let mut classes: Vec<&str> = element
            .classes()
            .filter(|class| self.config.retain_classes.contains(*class))
            .collect();
        if !classes.is_empty() {
            classes.sort_unstable();
            classes.dedup();
            attrs.insert("class".to_string(), classes.join(" "));
        }
        attrs
    }
}
