//! # sift-extract
//!
//! Reduces HTML documents to small, searchable fields.
//!
//! Each field is a [`Capture`]: a [`Selector`] that picks one subtree, plus a
//! [`CaptureConfig`] saying which tags, classes and attributes survive and
//! which elements turn into delimiters. Excising a capture:
//!
//! 1. selects the subtree and detaches it from the [`Document`],
//! 2. flattens it into [`Token`]s ([`TagStream`]),
//! 3. collapses the tokens ([`clean()`]),
//! 4. renders them as simplified HTML ([`render`]).
//!
//! Lines in the output are separated by [`LINE_BREAK`] and units by
//! [`UNIT_DELIMITER`]; the search front end splits on both.
//!
//! ```
//! use sift_extract::{Capture, CaptureConfig, Document, Selector};
//!
//! let mut doc = Document::parse(r#"<body><div id="entry"><b>ⲁⲃ</b>  noun</div></body>"#);
//! let capture = Capture::new("entry", Selector::id("entry"));
//! assert_eq!(capture.excise(&mut doc).unwrap(), "<b>ⲁⲃ</b> noun");
//! ```

pub mod capture;
pub mod clean;
pub mod document;
pub mod error;
pub mod selector;
pub mod stream;
pub mod token;

pub use capture::{
    BLOCK_ELEMENTS_DEFAULT, Capture, CaptureConfig, RETAIN_TAGS_DEFAULT, SPACE_ELEMENTS_DEFAULT,
};
pub use clean::clean;
pub use document::Document;
pub use error::ExtractError;
pub use selector::Selector;
pub use stream::TagStream;
pub use token::{LINE_BREAK, Token, UNIT_DELIMITER, render};
