//! Tokens of simplified HTML.
//!
//! A field value is produced as a flat token sequence and only turned into a
//! string at the very end. Keeping tags, text and delimiters apart lets the
//! cleaner reason about structure without re-parsing markup.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Literal emitted for a [`Token::LineBreak`].
pub const LINE_BREAK: &str = "<br>";

/// Literal emitted for a [`Token::UnitBreak`].
pub const UNIT_DELIMITER: &str = r#"<hr class="match-separator">"#;

/// One piece of simplified HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Decoded text, escaped on render.
    Text(String),
    /// An opening tag. Attributes are kept sorted by name.
    Open {
        name: String,
        attrs: BTreeMap<String, String>,
    },
    /// A closing tag.
    Close(String),
    /// Separates two lines of a unit.
    LineBreak,
    /// Separates two independently searchable units.
    UnitBreak,
}

impl Token {
    /// A text token.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The single-space text token used to join whitespace runs.
    #[must_use]
    pub fn space() -> Self {
        Self::Text(" ".to_string())
    }

    /// An opening tag without attributes.
    pub fn open(name: impl Into<String>) -> Self {
        Self::Open {
            name: name.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// An opening tag with the given attributes.
    pub fn open_with<K, V>(name: impl Into<String>, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Open {
            name: name.into(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A closing tag.
    pub fn close(name: impl Into<String>) -> Self {
        Self::Close(name.into())
    }

    /// Whether this is a text token made only of whitespace.
    ///
    /// Tags are never whitespace, even when they wrap nothing.
    #[must_use]
    pub fn is_space(&self) -> bool {
        matches!(self, Self::Text(text) if text.chars().all(char::is_whitespace))
    }

    /// Whether this is a text token with visible content.
    #[must_use]
    pub fn is_content(&self) -> bool {
        matches!(self, Self::Text(_)) && !self.is_space()
    }

    /// Whether this is an opening or closing tag.
    #[must_use]
    pub const fn is_tag(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Close(_))
    }

    /// Whether this is a line or unit delimiter.
    #[must_use]
    pub const fn is_delimiter(&self) -> bool {
        matches!(self, Self::LineBreak | Self::UnitBreak)
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => escape_text(text, out),
            Self::Open { name, attrs } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attrs {
                    let _ = write!(out, " {key}=\"");
                    escape_attr(value, out);
                    out.push('"');
                }
                out.push('>');
            }
            Self::Close(name) => {
                let _ = write!(out, "</{name}>");
            }
            Self::LineBreak => out.push_str(LINE_BREAK),
            Self::UnitBreak => out.push_str(UNIT_DELIMITER),
        }
    }
}

/// Render a token sequence as a string of simplified HTML.
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.write_html(&mut out);
    }
    out
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
}
