//! # Editing Commands
//!
//! High-level editing intents, each turned into one tree transform.
//!
//! ## Command Semantics
//!
//! ### ToggleMark
//! - Binary: if every character in the range has the mark it is removed,
//!   otherwise it is added to the whole range
//! - `link` cannot be toggled, it needs an href (see `SetLink`)
//!
//! ### SetLink
//! - `None` or an empty href removes links from the range
//! - Hrefs without an `http(s)` scheme get `https://`
//!
//! ### SetHeadingLevel
//! - Paragraph becomes a heading; a heading of the same level reverts to a
//!   paragraph; any other heading changes level
//!
//! ### InsertImage
//! - Images are inline: inside a paragraph or heading they are inserted in
//!   place, anywhere else they are wrapped in a new paragraph first
//!
//! ### SetBlockAlign / SetImageAttributes
//! - Only images carry alignment; width is clamped to the minimum
//!
//! Text ranges are `start..end` character offsets, see [`folio_document::range`].

use crate::errors::EditError;
use folio_document::{
    normalize_href, schema, ContentTree, HeadingLevel, ImageAttrs, Mark, MarkType, Node, NodeKind,
    Path, TextAlign, TreeError,
};
use serde::{Deserialize, Serialize};

/// Editing intents accepted by [`CommandEngine`](crate::CommandEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Flip a mark on a text range
    ToggleMark {
        mark: MarkType,
        start: usize,
        end: usize,
    },

    /// Turn a textblock into a heading (or back into a paragraph)
    SetHeadingLevel { path: Path, level: HeadingLevel },

    /// Align a block; only images support alignment
    SetBlockAlign { path: Path, align: TextAlign },

    /// Insert an image at a cursor (parent path + index)
    InsertImage {
        at: Path,
        src: String,
        alt: Option<String>,
    },

    /// Change image width and/or alignment
    SetImageAttributes {
        path: Path,
        width: Option<u32>,
        text_align: Option<TextAlign>,
    },

    /// Remove a node and its subtree
    DeleteNode { path: Path },

    /// Set or clear the link on a text range
    SetLink {
        start: usize,
        end: usize,
        href: Option<String>,
    },

    Undo,

    Redo,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ToggleMark { .. } => "toggle_mark",
            Command::SetHeadingLevel { .. } => "set_heading_level",
            Command::SetBlockAlign { .. } => "set_block_align",
            Command::InsertImage { .. } => "insert_image",
            Command::SetImageAttributes { .. } => "set_image_attributes",
            Command::DeleteNode { .. } => "delete_node",
            Command::SetLink { .. } => "set_link",
            Command::Undo => "undo",
            Command::Redo => "redo",
        }
    }

    /// Undo and redo move through history instead of transforming the tree
    pub fn is_history(&self) -> bool {
        matches!(self, Command::Undo | Command::Redo)
    }

    /// Human-readable label for undo/redo menus
    pub fn description(&self) -> String {
        match self {
            Command::ToggleMark { mark, .. } => format!("Toggle {}", mark),
            Command::SetHeadingLevel { level, .. } => format!("Heading {}", level.get()),
            Command::SetBlockAlign { align, .. } => format!("Align {}", align.as_str()),
            Command::InsertImage { .. } => "Insert image".to_string(),
            Command::SetImageAttributes {
                width: Some(_),
                text_align: None,
                ..
            } => "Resize image".to_string(),
            Command::SetImageAttributes { .. } => "Edit image".to_string(),
            Command::DeleteNode { .. } => "Delete".to_string(),
            Command::SetLink { href: None, .. } => "Remove link".to_string(),
            Command::SetLink { .. } => "Set link".to_string(),
            Command::Undo => "Undo".to_string(),
            Command::Redo => "Redo".to_string(),
        }
    }

    /// Compute the tree this command produces from `tree`.
    ///
    /// History commands return `tree` unchanged; the engine handles them.
    pub fn apply(&self, tree: &ContentTree) -> Result<ContentTree, EditError> {
        match self {
            Command::ToggleMark { mark, start, end } => {
                Self::apply_toggle_mark(tree, *mark, *start, *end)
            }

            Command::SetHeadingLevel { path, level } => {
                Self::apply_set_heading_level(tree, path, *level)
            }

            Command::SetBlockAlign { path, align } => {
                Self::apply_set_image_attributes(tree, path, None, Some(*align))
            }

            Command::InsertImage { at, src, alt } => Self::apply_insert_image(tree, at, src, alt),

            Command::SetImageAttributes {
                path,
                width,
                text_align,
            } => Self::apply_set_image_attributes(tree, path, *width, *text_align),

            Command::DeleteNode { path } => Ok(tree.remove_at(path)?),

            Command::SetLink { start, end, href } => {
                Self::apply_set_link(tree, *start, *end, href.as_deref())
            }

            Command::Undo | Command::Redo => Ok(tree.clone()),
        }
    }

    fn check_range(tree: &ContentTree, start: usize, end: usize) -> Result<(), EditError> {
        if tree.check_range(&(start..end)).is_err() {
            return Err(EditError::InvalidRange {
                start,
                end,
                len: tree.text_len(),
            });
        }
        if start == end {
            return Err(EditError::EmptyRange(start));
        }
        Ok(())
    }

    fn apply_toggle_mark(
        tree: &ContentTree,
        mark_type: MarkType,
        start: usize,
        end: usize,
    ) -> Result<ContentTree, EditError> {
        let mark = Mark::simple(mark_type).ok_or(EditError::LinkNeedsHref)?;
        Self::check_range(tree, start, end)?;

        let updated = if tree.range_has_mark(start..end, mark_type) {
            tree.update_marks(start..end, |marks| {
                marks.remove(mark_type);
            })?
        } else {
            tree.update_marks(start..end, |marks| marks.insert(mark.clone()))?
        };

        Ok(updated)
    }

    fn apply_set_link(
        tree: &ContentTree,
        start: usize,
        end: usize,
        href: Option<&str>,
    ) -> Result<ContentTree, EditError> {
        Self::check_range(tree, start, end)?;

        let href = href.map(normalize_href).unwrap_or_default();
        let updated = if href.is_empty() {
            tree.update_marks(start..end, |marks| {
                marks.remove(MarkType::Link);
            })?
        } else {
            tree.update_marks(start..end, |marks| {
                marks.insert(Mark::Link { href: href.clone() })
            })?
        };

        Ok(updated)
    }

    fn apply_set_heading_level(
        tree: &ContentTree,
        path: &Path,
        level: HeadingLevel,
    ) -> Result<ContentTree, EditError> {
        let node = tree.get(path)?;

        let kind = match node.kind() {
            NodeKind::Paragraph => NodeKind::Heading { level },
            NodeKind::Heading { level: current } if *current == level => NodeKind::Paragraph,
            NodeKind::Heading { .. } => NodeKind::Heading { level },
            _ => {
                return Err(EditError::KindMismatch {
                    path: path.clone(),
                    expected: "paragraph or heading",
                    found: node.node_type(),
                })
            }
        };

        Ok(tree.replace_at(path, node.with_kind(kind))?)
    }

    fn apply_set_image_attributes(
        tree: &ContentTree,
        path: &Path,
        width: Option<u32>,
        text_align: Option<TextAlign>,
    ) -> Result<ContentTree, EditError> {
        let node = tree.get(path)?;
        let mut attrs = node
            .image_attrs()
            .cloned()
            .ok_or_else(|| EditError::KindMismatch {
                path: path.clone(),
                expected: "image",
                found: node.node_type(),
            })?;

        if let Some(width) = width {
            attrs.set_width(width);
        }
        if let Some(text_align) = text_align {
            attrs.set_text_align(text_align);
        }

        Ok(tree.replace_at(path, Node::image(attrs))?)
    }

    fn apply_insert_image(
        tree: &ContentTree,
        at: &Path,
        src: &str,
        alt: &Option<String>,
    ) -> Result<ContentTree, EditError> {
        if src.trim().is_empty() {
            return Err(EditError::EmptySource);
        }

        let (parent_path, index) = at
            .split_last()
            .ok_or_else(|| TreeError::PathNotFound(at.clone()))?;
        let parent = tree.get(&parent_path)?;
        let image = Node::image(ImageAttrs::new(src).with_alt(alt.clone()));

        let updated = if schema::accepts_inline(parent.node_type()) {
            tree.insert_child(&parent_path, index, image)?
        } else {
            tree.insert_child(&parent_path, index, Node::paragraph(vec![image]))?
        };

        Ok(updated)
    }
}
