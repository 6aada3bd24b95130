//! # Folio Editor
//!
//! Editing engine for Folio documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: ContentTree + JSON format         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + commands       │
//! │  - Load/save through a DocumentStore        │
//! │  - Apply commands with schema validation    │
//! │  - Revision history for undo/redo           │
//! │  - Interactive drags coalesced to 1 command │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ cli: check, fmt, templates, new             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: every command yields a new tree, old revisions stay valid
//! 2. **One gesture, one entry**: a drag updates local state and commits once
//! 3. **Saving is not editing**: a failed save never rewrites local state
//!
//! ## Usage
//!
//! ```rust
//! use folio_document::{ContentTree, MarkType, Node};
//! use folio_editor::{Command, CommandEngine};
//!
//! let tree = ContentTree::new(Node::doc(vec![
//!     Node::paragraph(vec![Node::text("Hello world")]),
//! ])).unwrap();
//!
//! let mut engine = CommandEngine::new(tree);
//! engine.apply(Command::ToggleMark { mark: MarkType::Bold, start: 0, end: 5 }).unwrap();
//! assert!(engine.tree().range_has_mark(0..5, MarkType::Bold));
//!
//! engine.undo();
//! assert_eq!(engine.undo_levels(), 0);
//! ```

mod commands;
mod config;
mod document;
mod engine;
mod errors;
mod interactive;
mod store;
mod undo_stack;

pub use commands::Command;
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use document::{ContentOrigin, Document};
pub use engine::{CommandEngine, CommandSink, Revision};
pub use errors::{EditError, EditorError};
pub use interactive::{
    ContinuousAttribute, DragSession, DragState, EndOutcome, ImageResizeSession, ImageWidth,
    InteractiveAttributeSession, DEFAULT_DRAG_TIMEOUT,
};
pub use store::{
    DocumentDetail, DocumentStore, ImageUpload, MemoryDocumentStore, StoreError, StoreResponse,
    StoredDocument, UpdateInfo, UploadResponse, CODE_OK,
};
pub use undo_stack::{HistoryEntry, UndoStack};
