//! Error types for the content model

use crate::node::NodeType;
use crate::path::Path;
use thiserror::Error;

pub type TreeResult<T> = Result<T, TreeError>;

/// A structural edit that cannot be applied to a tree.
///
/// Returning one of these never leaves a tree half-edited: the tree the
/// operation was called on is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Path not found: {0}")]
    PathNotFound(Path),

    #[error("Invalid index {index} (node has {len} children)")]
    InvalidIndex { index: usize, len: usize },

    #[error("`{child}` is not allowed inside `{parent}`")]
    IllegalChild { parent: NodeType, child: NodeType },

    #[error("Root node must be `doc`, found `{0}`")]
    NotADocument(NodeType),

    #[error("Text node at {0} is empty")]
    EmptyText(Path),

    #[error("Image at {0} has no source")]
    EmptyImageSource(Path),

    #[error("Link href `{href}` at {at} is not normalized")]
    UnnormalizedHref { href: String, at: Path },
}

/// Persisted content that cannot be turned into a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Malformed node object: {0}")]
    Shape(String),

    #[error("Root node must be `doc`, found `{0}`")]
    RootNotDoc(String),

    #[error("Unknown node type `{kind}` at {at}")]
    UnknownKind { kind: String, at: Path },

    #[error("Unknown mark type `{kind}` at {at}")]
    UnknownMark { kind: String, at: Path },

    #[error("`{kind}` at {at} cannot have content")]
    LeafWithChildren { kind: NodeType, at: Path },

    #[error("`{kind}` at {at} is missing attribute `{attr}`")]
    MissingAttribute {
        kind: String,
        attr: &'static str,
        at: Path,
    },

    #[error("Invalid value for `{attr}` at {at}: {value}")]
    InvalidAttribute {
        attr: &'static str,
        value: String,
        at: Path,
    },

    #[error("Text node at {0} is empty")]
    EmptyText(Path),

    #[error("`{child}` is not allowed inside `{parent}` at {at}")]
    IllegalChild {
        parent: NodeType,
        child: NodeType,
        at: Path,
    },
}

impl FormatError {
    pub(crate) fn missing(kind: impl Into<String>, attr: &'static str, at: &Path) -> Self {
        Self::MissingAttribute {
            kind: kind.into(),
            attr,
            at: at.clone(),
        }
    }

    pub(crate) fn invalid(attr: &'static str, value: impl ToString, at: &Path) -> Self {
        Self::InvalidAttribute {
            attr,
            value: value.to_string(),
            at: at.clone(),
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match e.classify() {
            Category::Data => FormatError::Shape(e.to_string()),
            Category::Syntax | Category::Eof | Category::Io => FormatError::Syntax {
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
            },
        }
    }
}
