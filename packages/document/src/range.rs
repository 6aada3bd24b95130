//! Character-range queries and mark edits.
//!
//! Offsets count Unicode scalar values over the text of every text node in
//! document order. Block boundaries take up no positions, so in
//! `doc(p("ab"), p("cd"))` the range `1..3` covers `b` and `c`.

use crate::error::{TreeError, TreeResult};
use crate::mark::{MarkSet, MarkType};
use crate::node::{Node, NodeKind};
use crate::path::Path;
use crate::tree::ContentTree;
use std::ops::Range;
use std::sync::Arc;

impl ContentTree {
    /// Path and character range of every text node, in document order
    pub fn text_spans(&self) -> Vec<(Path, Range<usize>)> {
        let mut offset = 0;
        let mut spans = Vec::new();
        for (path, node) in self.walk() {
            if let Some(value) = node.text_value() {
                let len = value.chars().count();
                spans.push((path, offset..offset + len));
                offset += len;
            }
        }
        spans
    }

    /// Fail unless `range` lies within the document text
    pub fn check_range(&self, range: &Range<usize>) -> TreeResult<()> {
        let len = self.text_len();
        if range.start > range.end {
            return Err(TreeError::InvalidIndex {
                index: range.start,
                len: range.end,
            });
        }
        if range.end > len {
            return Err(TreeError::InvalidIndex {
                index: range.end,
                len,
            });
        }
        Ok(())
    }

    /// Whether every character in `range` carries a mark of `mark_type`.
    ///
    /// Vacuously true for an empty range.
    pub fn range_has_mark(&self, range: Range<usize>, mark_type: MarkType) -> bool {
        self.walk()
            .into_iter()
            .filter_map(|(_, node)| match node.kind() {
                NodeKind::Text { value, marks } => Some((value.chars().count(), marks)),
                _ => None,
            })
            .scan(0usize, |offset, (len, marks)| {
                let start = *offset;
                *offset += len;
                Some((start..start + len, marks))
            })
            .filter(|(span, _)| span.start.max(range.start) < span.end.min(range.end))
            .all(|(_, marks)| marks.contains(mark_type))
    }

    /// Apply `f` to the marks of every character in `range`.
    ///
    /// Text nodes straddling the range boundaries are split, and adjacent
    /// text nodes that end up with equal marks are merged, so an edit
    /// followed by its opposite restores the original node layout.
    pub fn update_marks<F>(&self, range: Range<usize>, f: F) -> TreeResult<ContentTree>
    where
        F: Fn(&mut MarkSet),
    {
        self.check_range(&range)?;

        let root = self.get_shared(&Path::root())?;
        let mut edit = MarkEdit {
            range,
            f: &f,
            offset: 0,
        };

        Ok(match edit.visit(&root) {
            Some(root) => ContentTree::from_root(root),
            None => self.clone(),
        })
    }
}

struct MarkEdit<'a, F> {
    range: Range<usize>,
    f: &'a F,
    offset: usize,
}

impl<F> MarkEdit<'_, F>
where
    F: Fn(&mut MarkSet),
{
    /// Returns the rebuilt node, or `None` when nothing in it changed
    fn visit(&mut self, node: &Arc<Node>) -> Option<Arc<Node>> {
        let node_start = self.offset;
        let node_end = node_start + node.text_len();
        if node_end <= self.range.start || node_start >= self.range.end {
            self.offset = node_end;
            return None;
        }

        let mut changed = false;
        let mut children = Vec::with_capacity(node.children.len() + 2);

        for child in &node.children {
            if let NodeKind::Text { value, marks } = &child.kind {
                let start = self.offset;
                let len = value.chars().count();
                self.offset += len;

                let lo = self.range.start.max(start);
                let hi = self.range.end.min(start + len);
                if lo >= hi {
                    children.push(Arc::clone(child));
                    continue;
                }

                let mut updated = marks.clone();
                (self.f)(&mut updated);
                if updated == *marks {
                    children.push(Arc::clone(child));
                    continue;
                }

                changed = true;
                let (before, middle, after) = split_chars(value, lo - start, hi - start);
                if !before.is_empty() {
                    children.push(Arc::new(Node::marked_text(before, marks.clone())));
                }
                children.push(Arc::new(Node::marked_text(middle, updated)));
                if !after.is_empty() {
                    children.push(Arc::new(Node::marked_text(after, marks.clone())));
                }
            } else {
                match self.visit(child) {
                    Some(rebuilt) => {
                        changed = true;
                        children.push(rebuilt);
                    }
                    None => children.push(Arc::clone(child)),
                }
            }
        }

        if !changed {
            return None;
        }

        Some(Arc::new(Node {
            kind: node.kind.clone(),
            children: merge_adjacent_text(children),
        }))
    }
}

fn byte_offset(value: &str, chars: usize) -> usize {
    value
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

fn split_chars(value: &str, from: usize, to: usize) -> (&str, &str, &str) {
    let a = byte_offset(value, from);
    let b = byte_offset(value, to);
    (&value[..a], &value[a..b], &value[b..])
}

fn merge_adjacent_text(children: Vec<Arc<Node>>) -> Vec<Arc<Node>> {
    let mut merged: Vec<Arc<Node>> = Vec::with_capacity(children.len());

    for child in children {
        if let Some(last) = merged.last_mut() {
            if let (
                NodeKind::Text { value: left, marks: left_marks },
                NodeKind::Text { value: right, marks: right_marks },
            ) = (&last.kind, &child.kind)
            {
                if left_marks == right_marks {
                    let joined = format!("{}{}", left, right);
                    *last = Arc::new(Node::marked_text(joined, left_marks.clone()));
                    continue;
                }
            }
        }
        merged.push(child);
    }

    merged
}
