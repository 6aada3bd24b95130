//! # Folio Document
//!
//! The rich-text content model shared by the editor and the tooling.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ serializer: persisted JSON ↔ ContentTree     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tree: immutable node tree                   │
//! │  - Index-path addressing                    │
//! │  - Copy-on-write transforms                 │
//! │  - Schema checks on every transform         │
//! │  - Text-range mark edits                    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! A [`ContentTree`] is never mutated in place. Every transform returns a new
//! tree that shares all untouched subtrees with the original, so keeping old
//! revisions around for undo costs only the nodes along edited paths.
//!
//! ## Usage
//!
//! ```rust
//! use folio_document::{serializer, ContentTree, Node, Path};
//!
//! let tree = ContentTree::new(Node::doc(vec![Node::paragraph(vec![Node::text("Hello")])]))?;
//! let tree = tree.insert_child(&Path::root(), 1, Node::horizontal_rule())?;
//!
//! let json = serializer::serialize(&tree);
//! assert_eq!(serializer::deserialize(&json)?, tree);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod mark;
pub mod node;
pub mod path;
pub mod range;
pub mod schema;
pub mod serializer;
pub mod templates;
pub mod tree;

pub use error::{FormatError, TreeError};
pub use mark::{normalize_href, Mark, MarkSet, MarkType};
pub use node::{
    HeadingLevel, ImageAttrs, Node, NodeKind, NodeType, TextAlign, DEFAULT_IMAGE_WIDTH,
    MIN_IMAGE_WIDTH,
};
pub use path::Path;
pub use templates::{find_template, templates, Template};
pub use tree::ContentTree;
