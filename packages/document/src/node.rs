//! Typed document nodes

use crate::error::{TreeError, TreeResult};
use crate::mark::{normalize_href, Mark, MarkSet, MarkType};
use crate::path::Path;
use crate::schema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Narrowest width an image can be resized to, in pixels
pub const MIN_IMAGE_WIDTH: u32 = 50;

/// Width given to images that carry none
pub const DEFAULT_IMAGE_WIDTH: u32 = 300;

/// Node discriminant, used by the schema and in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Doc,
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    TaskList,
    TaskItem,
    Image,
    HorizontalRule,
    Text,
}

impl NodeType {
    pub const ALL: [NodeType; 11] = [
        NodeType::Doc,
        NodeType::Paragraph,
        NodeType::Heading,
        NodeType::BulletList,
        NodeType::OrderedList,
        NodeType::ListItem,
        NodeType::TaskList,
        NodeType::TaskItem,
        NodeType::Image,
        NodeType::HorizontalRule,
        NodeType::Text,
    ];

    /// Name used in the persisted format
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Doc => "doc",
            NodeType::Paragraph => "paragraph",
            NodeType::Heading => "heading",
            NodeType::BulletList => "bulletList",
            NodeType::OrderedList => "orderedList",
            NodeType::ListItem => "listItem",
            NodeType::TaskList => "taskList",
            NodeType::TaskItem => "taskItem",
            NodeType::Image => "image",
            NodeType::HorizontalRule => "horizontalRule",
            NodeType::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }

    /// Leaf kinds never have children
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeType::Image | NodeType::HorizontalRule | NodeType::Text)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H1,
    H2,
}

impl HeadingLevel {
    pub fn get(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            other => Err(format!("heading level must be 1 or 2, got {}", other)),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.get()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            _ => None,
        }
    }
}

/// Attributes of an inline image.
///
/// The width setters clamp to [`MIN_IMAGE_WIDTH`], so an `ImageAttrs` value
/// is always within bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageAttrs {
    src: String,
    alt: Option<String>,
    width: u32,
    text_align: TextAlign,
}

impl ImageAttrs {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: None,
            width: DEFAULT_IMAGE_WIDTH,
            text_align: TextAlign::default(),
        }
    }

    pub fn with_alt(mut self, alt: Option<String>) -> Self {
        self.alt = alt;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.set_width(width);
        self
    }

    pub fn with_text_align(mut self, text_align: TextAlign) -> Self {
        self.text_align = text_align;
        self
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width.max(MIN_IMAGE_WIDTH);
    }

    pub fn set_text_align(&mut self, text_align: TextAlign) {
        self.text_align = text_align;
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }
}

/// Node kind together with its per-kind attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading { level: HeadingLevel },
    BulletList,
    OrderedList,
    ListItem,
    TaskList,
    TaskItem { checked: bool },
    Image(ImageAttrs),
    HorizontalRule,
    Text { value: String, marks: MarkSet },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Doc => NodeType::Doc,
            NodeKind::Paragraph => NodeType::Paragraph,
            NodeKind::Heading { .. } => NodeType::Heading,
            NodeKind::BulletList => NodeType::BulletList,
            NodeKind::OrderedList => NodeType::OrderedList,
            NodeKind::ListItem => NodeType::ListItem,
            NodeKind::TaskList => NodeType::TaskList,
            NodeKind::TaskItem { .. } => NodeType::TaskItem,
            NodeKind::Image(_) => NodeType::Image,
            NodeKind::HorizontalRule => NodeType::HorizontalRule,
            NodeKind::Text { .. } => NodeType::Text,
        }
    }
}

/// A node in the content tree.
///
/// Children are reference counted so trees derived from one another share
/// every subtree an edit did not touch. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<Arc<Node>>,
}

impl Node {
    /// Build a node without checking the schema.
    ///
    /// Trees check their nodes when constructed or edited, see
    /// [`ContentTree::new`](crate::ContentTree::new).
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn doc(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Doc, children)
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Paragraph, children)
    }

    pub fn heading(level: HeadingLevel, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Heading { level }, children)
    }

    pub fn bullet_list(items: Vec<Node>) -> Self {
        Self::new(NodeKind::BulletList, items)
    }

    pub fn ordered_list(items: Vec<Node>) -> Self {
        Self::new(NodeKind::OrderedList, items)
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Self::new(NodeKind::ListItem, children)
    }

    pub fn task_list(items: Vec<Node>) -> Self {
        Self::new(NodeKind::TaskList, items)
    }

    pub fn task_item(checked: bool, children: Vec<Node>) -> Self {
        Self::new(NodeKind::TaskItem { checked }, children)
    }

    pub fn image(attrs: ImageAttrs) -> Self {
        Self::leaf(NodeKind::Image(attrs))
    }

    pub fn horizontal_rule() -> Self {
        Self::leaf(NodeKind::HorizontalRule)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::marked_text(value, MarkSet::new())
    }

    pub fn marked_text(value: impl Into<String>, marks: MarkSet) -> Self {
        Self::leaf(NodeKind::Text {
            value: value.into(),
            marks,
        })
    }

    /// Text node carrying the given marks
    pub fn text_with(value: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        Self::marked_text(value, marks.into_iter().collect())
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn children(&self) -> &[Arc<Node>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index).map(|c| c.as_ref())
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.node_type().is_leaf()
    }

    /// Text value, for text nodes
    pub fn text_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn marks(&self) -> Option<&MarkSet> {
        match &self.kind {
            NodeKind::Text { marks, .. } => Some(marks),
            _ => None,
        }
    }

    pub fn image_attrs(&self) -> Option<&ImageAttrs> {
        match &self.kind {
            NodeKind::Image(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Same node with a different kind, sharing the existing children
    pub fn with_kind(&self, kind: NodeKind) -> Self {
        Self {
            kind,
            children: self.children.clone(),
        }
    }

    /// Number of text characters in this subtree
    pub fn text_len(&self) -> usize {
        match &self.kind {
            NodeKind::Text { value, .. } => value.chars().count(),
            _ => self.children.iter().map(|c| c.text_len()).sum(),
        }
    }

    /// Concatenated text of this subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeKind::Text { value, .. } = &self.kind {
            out.push_str(value);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Check this subtree against the node kind rules and the schema.
    ///
    /// `at` is the path of `self`, used for error reporting.
    pub fn validate(&self, at: &Path) -> TreeResult<()> {
        let parent = self.node_type();

        match &self.kind {
            NodeKind::Text { value, marks } => {
                if value.is_empty() {
                    return Err(TreeError::EmptyText(at.clone()));
                }
                if let Some(Mark::Link { href }) = marks.get(MarkType::Link) {
                    if href.is_empty() || normalize_href(href) != *href {
                        return Err(TreeError::UnnormalizedHref {
                            href: href.clone(),
                            at: at.clone(),
                        });
                    }
                }
            }
            NodeKind::Image(image) if image.src().is_empty() => {
                return Err(TreeError::EmptyImageSource(at.clone()));
            }
            _ => {}
        }

        for (i, child) in self.children.iter().enumerate() {
            let child_type = child.node_type();
            if !schema::permits(parent, child_type) {
                return Err(TreeError::IllegalChild {
                    parent,
                    child: child_type,
                });
            }
            child.validate(&at.child(i))?;
        }

        Ok(())
    }

    pub fn is_well_formed(&self) -> bool {
        self.validate(&Path::root()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_width_is_clamped() {
        let attrs = ImageAttrs::new("a.png").with_width(10);
        assert_eq!(attrs.width(), MIN_IMAGE_WIDTH);

        let attrs = ImageAttrs::new("a.png");
        assert_eq!(attrs.width(), DEFAULT_IMAGE_WIDTH);
        assert_eq!(attrs.text_align(), TextAlign::Left);
    }

    #[test]
    fn test_heading_level_bounds() {
        assert_eq!(HeadingLevel::try_from(2u8), Ok(HeadingLevel::H2));
        assert!(HeadingLevel::try_from(3u8).is_err());
    }

    #[test]
    fn test_validate_rejects_children_on_leaf() {
        let bad = Node::paragraph(vec![Node::new(
            NodeKind::Text {
                value: "x".to_string(),
                marks: MarkSet::new(),
            },
            vec![Node::text("nested")],
        )]);

        assert_eq!(
            bad.validate(&Path::root()),
            Err(TreeError::IllegalChild {
                parent: NodeType::Text,
                child: NodeType::Text,
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_text() {
        let bad = Node::doc(vec![Node::paragraph(vec![Node::text("")])]);
        assert_eq!(
            bad.validate(&Path::root()),
            Err(TreeError::EmptyText(Path::from([0, 0])))
        );
    }

    #[test]
    fn test_validate_rejects_raw_link_href() {
        let bad = Node::doc(vec![Node::paragraph(vec![Node::text_with(
            "x",
            [Mark::Link {
                href: "example.com".to_string(),
            }],
        )])]);
        assert_eq!(
            bad.validate(&Path::root()),
            Err(TreeError::UnnormalizedHref {
                href: "example.com".to_string(),
                at: Path::from([0, 0]),
            })
        );

        let good = Node::doc(vec![Node::paragraph(vec![Node::text_with(
            "x",
            [Mark::link("example.com")],
        )])]);
        assert!(good.is_well_formed());
    }

    #[test]
    fn test_validate_rejects_empty_image_source() {
        let bad = Node::doc(vec![Node::paragraph(vec![Node::image(ImageAttrs::new(""))])]);
        assert_eq!(
            bad.validate(&Path::root()),
            Err(TreeError::EmptyImageSource(Path::from([0, 0])))
        );
    }

    #[test]
    fn test_text_len_counts_chars() {
        let node = Node::paragraph(vec![Node::text("héllo"), Node::text(" 世界")]);
        assert_eq!(node.text_len(), 8);
        assert_eq!(node.text_content(), "héllo 世界");
    }
}
