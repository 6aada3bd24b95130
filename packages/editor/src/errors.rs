//! Error types for the editor

use crate::store::StoreError;
use folio_document::{FormatError, NodeType, Path, TreeError};
use thiserror::Error;

/// Why [`CommandEngine::apply`](crate::CommandEngine::apply) rejected a command.
///
/// A rejected command leaves the engine exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Range {start}..{end} is outside the document text (length {len})")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Empty range at offset {0}")]
    EmptyRange(usize),

    #[error("Expected {expected} at {path}, found `{found}`")]
    KindMismatch {
        path: Path,
        expected: &'static str,
        found: NodeType,
    },

    #[error("Link marks need an href, use SetLink")]
    LinkNeedsHref,

    #[error("Image source is empty")]
    EmptySource,
}

impl EditError {
    pub fn is_path_not_found(&self) -> bool {
        matches!(self, EditError::Tree(TreeError::PathNotFound(_)))
    }

    /// The command addressed a node that is gone or was replaced by another kind
    pub fn is_stale_target(&self) -> bool {
        self.is_path_not_found() || matches!(self, EditError::KindMismatch { .. })
    }
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Save failed: {0}")]
    Save(String),

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
