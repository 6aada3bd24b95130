//! # Command Engine
//!
//! The single mutation gateway for a document.
//!
//! The engine owns the current revision and its history. Every successful
//! command records exactly one undo entry; the engine never merges entries,
//! so callers that drive continuous gestures must apply once per gesture
//! (see [`InteractiveAttributeSession`](crate::InteractiveAttributeSession)).

use crate::commands::Command;
use crate::errors::EditError;
use crate::undo_stack::{HistoryEntry, UndoStack};
use folio_document::ContentTree;
use tracing::debug;

/// Immutable snapshot of the document with its sequence number.
///
/// Sequence numbers are handed out in increasing order as revisions are
/// created; undo and redo bring back older revisions with their original
/// numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    seq: u64,
    tree: ContentTree,
}

impl Revision {
    pub fn new(seq: u64, tree: ContentTree) -> Self {
        Self { seq, tree }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }
}

/// Anything commands can be issued to
pub trait CommandSink {
    /// The tree commands are currently applied to
    fn tree(&self) -> &ContentTree;

    fn apply(&mut self, command: Command) -> Result<ContentTree, EditError>;
}

/// Applies commands to the current revision and keeps undo/redo history
#[derive(Debug)]
pub struct CommandEngine {
    current: Revision,
    history: UndoStack,
    next_seq: u64,
}

impl CommandEngine {
    /// Engine with unbounded history
    pub fn new(tree: ContentTree) -> Self {
        Self::with_history_limit(tree, 0)
    }

    /// Engine keeping at most `limit` undo levels (0 = unlimited)
    pub fn with_history_limit(tree: ContentTree, limit: usize) -> Self {
        Self {
            current: Revision::new(0, tree),
            history: UndoStack::with_max_levels(limit),
            next_seq: 1,
        }
    }

    pub fn tree(&self) -> &ContentTree {
        self.current.tree()
    }

    pub fn revision(&self) -> &Revision {
        &self.current
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Apply a command and return the resulting tree.
    ///
    /// On error nothing changes: not the tree, the history or the sequence
    /// counter. `Undo`/`Redo` with empty stacks return the current tree.
    pub fn apply(&mut self, command: Command) -> Result<ContentTree, EditError> {
        match command {
            Command::Undo => {
                if let Some(previous) = self.history.undo(self.current.clone()) {
                    debug!(from = self.current.seq, to = previous.seq, "Undo");
                    self.current = previous;
                }
                Ok(self.current.tree.clone())
            }

            Command::Redo => {
                if let Some(next) = self.history.redo(self.current.clone()) {
                    debug!(from = self.current.seq, to = next.seq, "Redo");
                    self.current = next;
                }
                Ok(self.current.tree.clone())
            }

            command => {
                let tree = command.apply(&self.current.tree).map_err(|e| {
                    debug!(command = command.name(), error = %e, "Command rejected");
                    e
                })?;

                let revision = Revision::new(self.next_seq, tree.clone());
                self.next_seq += 1;

                let previous = std::mem::replace(&mut self.current, revision);
                self.history
                    .push(HistoryEntry::new(previous, command.description()));

                debug!(
                    command = command.name(),
                    seq = self.current.seq,
                    undo_levels = self.history.undo_levels(),
                    "Command applied"
                );
                Ok(tree)
            }
        }
    }

    pub fn undo(&mut self) -> ContentTree {
        self.apply(Command::Undo)
            .unwrap_or_else(|_| self.current.tree.clone())
    }

    pub fn redo(&mut self) -> ContentTree {
        self.apply(Command::Redo)
            .unwrap_or_else(|_| self.current.tree.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_levels(&self) -> usize {
        self.history.undo_levels()
    }

    pub fn redo_levels(&self) -> usize {
        self.history.redo_levels()
    }

    /// Replace the document wholesale and forget history (e.g. after a reload)
    pub fn reset(&mut self, tree: ContentTree) {
        self.current = Revision::new(self.next_seq, tree);
        self.next_seq += 1;
        self.history.clear();
    }
}

impl CommandSink for CommandEngine {
    fn tree(&self) -> &ContentTree {
        CommandEngine::tree(self)
    }

    fn apply(&mut self, command: Command) -> Result<ContentTree, EditError> {
        CommandEngine::apply(self, command)
    }
}
