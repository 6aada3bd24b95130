//! # Undo/Redo Stack
//!
//! Tracks revision history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each entry holds the full revision that was current before a command
//! - Snapshots share structure, so an entry costs only the nodes its command rebuilt
//! - Undo swaps the current revision with the top of the undo stack
//! - Redo swaps it back from the redo stack
//! - New entries clear the redo stack
//! - Unbounded unless a max level count is configured
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! stack.push(HistoryEntry::new(previous, "Toggle bold"));
//!
//! // Undo returns the revision to restore
//! let restored = stack.undo(current).unwrap();
//! ```

use crate::engine::Revision;

/// A revision together with the label of the command that replaced it
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub revision: Revision,
    pub description: String,
}

impl HistoryEntry {
    pub fn new(revision: Revision, description: impl Into<String>) -> Self {
        Self {
            revision,
            description: description.into(),
        }
    }
}

/// Undo/redo stack of document revisions
#[derive(Debug)]
pub struct UndoStack {
    /// Revisions before each applied command (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Revisions that were undone (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create an unbounded undo stack
    pub fn new() -> Self {
        Self::with_max_levels(0)
    }

    /// Create an undo stack keeping at most `max_levels` entries (0 = unlimited)
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the revision a new command replaced
    pub fn push(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Step back: returns the revision to restore, keeping `current` for redo.
    ///
    /// Returns `None` (and drops nothing) when there is nothing to undo.
    pub fn undo(&mut self, current: Revision) -> Option<Revision> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack
            .push(HistoryEntry::new(current, entry.description.clone()));
        Some(entry.revision)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: Revision) -> Option<Revision> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack
            .push(HistoryEntry::new(current, entry.description.clone()));
        Some(entry.revision)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|entry| entry.description.as_str())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|entry| entry.description.as_str())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
