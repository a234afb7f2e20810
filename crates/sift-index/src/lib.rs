//! # sift-index
//!
//! Builds a search index from a corpus of HTML documents.
//!
//! An [`Indexer`] holds the extract selectors and captures of one index. It
//! reads nothing itself: a [`Source`] loads the documents up front, the
//! indexer processes them on a rayon pool, and the resulting
//! [`IndexArtifact`] is validated before it can be written.
//!
//! ```
//! use sift_extract::{Capture, Selector};
//! use sift_index::{Indexer, Source, SourceDocument};
//!
//! let indexer = Indexer::new(
//!     vec![Selector::tag("nav").optional()],
//!     vec![Capture::new("text", Selector::tag("main"))],
//!     Vec::new(),
//! )
//! .unwrap();
//! let docs = Source::Documents(vec![SourceDocument::new(
//!     "ab/1",
//!     "<body><nav>menu</nav><main><b>ⲁⲃ</b> raven</main></body>",
//! )])
//! .load()
//! .unwrap();
//!
//! let artifact = indexer.build(&docs, |_| {}).unwrap();
//! assert_eq!(artifact.data[0].get("text"), Some("<b>ⲁⲃ</b> raven"));
//! ```

pub mod artifact;
pub mod builder;
pub mod error;
pub mod pool;
pub mod record;
pub mod source;
pub mod walk;

pub use artifact::{ADMISSIBLE, IndexArtifact, Metadata};
pub use builder::Indexer;
pub use error::{IndexError, Stage};
pub use record::{KEY, Record};
pub use source::{Source, SourceDocument};
