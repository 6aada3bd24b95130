//! # Serializer
//!
//! Converts between [`ContentTree`] and the persisted JSON document format:
//!
//! ```json
//! {"type":"doc","content":[{"type":"paragraph","content":[
//!     {"type":"text","text":"Hi","marks":[{"type":"bold"}]}
//! ]}]}
//! ```
//!
//! Output is deterministic. Node keys are written in a fixed order
//! (`type`, `attrs`, `content`, `text`, `marks`) and attribute maps are sorted,
//! so the same tree always produces the same bytes.

use crate::error::FormatError;
use crate::mark::{normalize_href, Mark, MarkSet, MarkType};
use crate::node::{HeadingLevel, ImageAttrs, Node, NodeKind, NodeType, TextAlign};
use crate::path::Path;
use crate::schema;
use crate::tree::ContentTree;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

/// Persisted node object
#[derive(Debug, Serialize, Deserialize)]
struct JsonNode {
    #[serde(rename = "type")]
    node_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<JsonNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    marks: Option<Vec<JsonMark>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonMark {
    #[serde(rename = "type")]
    mark_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Map<String, Value>>,
}

/// Serialize a tree to compact JSON
pub fn serialize(tree: &ContentTree) -> String {
    // Serializing plain strings, maps and vectors cannot fail
    serde_json::to_string(&to_json(tree.root())).unwrap_or_default()
}

/// Serialize a tree to indented JSON, for tooling and diffs
pub fn serialize_pretty(tree: &ContentTree) -> String {
    serde_json::to_string_pretty(&to_json(tree.root())).unwrap_or_default()
}

/// Parse persisted JSON into a tree
pub fn deserialize(input: &str) -> Result<ContentTree, FormatError> {
    let json: JsonNode = serde_json::from_str(input)?;
    if json.node_type != NodeType::Doc.as_str() {
        return Err(FormatError::RootNotDoc(json.node_type));
    }

    let root = from_json(json, &Path::root())?;
    let tree = ContentTree::new(root).map_err(|e| FormatError::Shape(e.to_string()))?;
    trace!(blocks = tree.root().child_count(), bytes = input.len(), "Deserialized document");
    Ok(tree)
}

fn to_json(node: &Node) -> JsonNode {
    let mut json = JsonNode {
        node_type: node.node_type().as_str().to_string(),
        attrs: None,
        content: None,
        text: None,
        marks: None,
    };

    match node.kind() {
        NodeKind::Heading { level } => {
            let mut attrs = Map::new();
            attrs.insert("level".to_string(), Value::from(level.get()));
            json.attrs = Some(attrs);
        }
        NodeKind::TaskItem { checked } => {
            let mut attrs = Map::new();
            attrs.insert("checked".to_string(), Value::Bool(*checked));
            json.attrs = Some(attrs);
        }
        NodeKind::Image(image) => {
            let mut attrs = Map::new();
            attrs.insert(
                "alt".to_string(),
                image.alt().map(Value::from).unwrap_or(Value::Null),
            );
            attrs.insert("src".to_string(), Value::from(image.src()));
            attrs.insert("textAlign".to_string(), Value::from(image.text_align().as_str()));
            attrs.insert("width".to_string(), Value::from(image.width()));
            json.attrs = Some(attrs);
        }
        NodeKind::Text { value, marks } => {
            json.text = Some(value.clone());
            if !marks.is_empty() {
                json.marks = Some(marks.iter().map(mark_to_json).collect());
            }
        }
        _ => {}
    }

    if !node.children().is_empty() {
        json.content = Some(node.children().iter().map(|c| to_json(c)).collect());
    }

    json
}

fn mark_to_json(mark: &Mark) -> JsonMark {
    let attrs = match mark {
        Mark::Link { href } => {
            let mut attrs = Map::new();
            attrs.insert("href".to_string(), Value::from(href.as_str()));
            Some(attrs)
        }
        _ => None,
    };

    JsonMark {
        mark_type: mark.mark_type().as_str().to_string(),
        attrs,
    }
}

fn from_json(json: JsonNode, at: &Path) -> Result<Node, FormatError> {
    let node_type = NodeType::from_name(&json.node_type).ok_or_else(|| FormatError::UnknownKind {
        kind: json.node_type.clone(),
        at: at.clone(),
    })?;

    let content = json.content.unwrap_or_default();
    if node_type.is_leaf() && !content.is_empty() {
        return Err(FormatError::LeafWithChildren {
            kind: node_type,
            at: at.clone(),
        });
    }

    let attrs = json.attrs.unwrap_or_default();
    let kind = match node_type {
        NodeType::Doc => NodeKind::Doc,
        NodeType::Paragraph => NodeKind::Paragraph,
        NodeType::BulletList => NodeKind::BulletList,
        NodeType::OrderedList => NodeKind::OrderedList,
        NodeType::ListItem => NodeKind::ListItem,
        NodeType::TaskList => NodeKind::TaskList,
        NodeType::HorizontalRule => NodeKind::HorizontalRule,
        NodeType::Heading => NodeKind::Heading {
            level: heading_level(&attrs, at)?,
        },
        NodeType::TaskItem => NodeKind::TaskItem {
            checked: match present(&attrs, "checked") {
                None => false,
                Some(Value::Bool(checked)) => *checked,
                Some(other) => return Err(FormatError::invalid("checked", other, at)),
            },
        },
        NodeType::Image => NodeKind::Image(image_attrs(&attrs, at)?),
        NodeType::Text => {
            let value = json
                .text
                .ok_or_else(|| FormatError::missing("text", "text", at))?;
            if value.is_empty() {
                return Err(FormatError::EmptyText(at.clone()));
            }
            NodeKind::Text {
                value,
                marks: marks_from_json(json.marks.unwrap_or_default(), at)?,
            }
        }
    };

    let mut children = Vec::with_capacity(content.len());
    for (i, child) in content.into_iter().enumerate() {
        let child_path = at.child(i);
        let child = from_json(child, &child_path)?;
        if !schema::permits(node_type, child.node_type()) {
            return Err(FormatError::IllegalChild {
                parent: node_type,
                child: child.node_type(),
                at: child_path,
            });
        }
        children.push(child);
    }

    Ok(Node::new(kind, children))
}

/// Attribute value, treating explicit `null` as absent
fn present<'a>(attrs: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    attrs.get(key).filter(|v| !v.is_null())
}

fn heading_level(attrs: &Map<String, Value>, at: &Path) -> Result<HeadingLevel, FormatError> {
    let value = present(attrs, "level").ok_or_else(|| FormatError::missing("heading", "level", at))?;
    value
        .as_u64()
        .and_then(|level| u8::try_from(level).ok())
        .and_then(|level| HeadingLevel::try_from(level).ok())
        .ok_or_else(|| FormatError::invalid("level", value, at))
}

fn image_attrs(attrs: &Map<String, Value>, at: &Path) -> Result<ImageAttrs, FormatError> {
    let src = match present(attrs, "src") {
        Some(Value::String(src)) if !src.is_empty() => src.clone(),
        Some(Value::String(_)) | None => return Err(FormatError::missing("image", "src", at)),
        Some(other) => return Err(FormatError::invalid("src", other, at)),
    };

    let alt = match present(attrs, "alt") {
        None => None,
        Some(Value::String(alt)) => Some(alt.clone()),
        Some(other) => return Err(FormatError::invalid("alt", other, at)),
    };

    let mut image = ImageAttrs::new(src).with_alt(alt);

    // Widths written by the resize handle are numbers; older content may carry strings
    match present(attrs, "width") {
        None => {}
        Some(Value::Number(n)) => {
            let width = n
                .as_u64()
                .or_else(|| n.as_f64().filter(|w| *w >= 0.0).map(|w| w.round() as u64))
                .ok_or_else(|| FormatError::invalid("width", n, at))?;
            image.set_width(u32::try_from(width).unwrap_or(u32::MAX));
        }
        Some(Value::String(s)) => {
            let width: u32 = s
                .trim()
                .trim_end_matches("px")
                .parse()
                .map_err(|_| FormatError::invalid("width", s, at))?;
            image.set_width(width);
        }
        Some(other) => return Err(FormatError::invalid("width", other, at)),
    }

    match present(attrs, "textAlign") {
        None => {}
        Some(Value::String(align)) => {
            let align = TextAlign::from_name(align)
                .ok_or_else(|| FormatError::invalid("textAlign", align, at))?;
            image.set_text_align(align);
        }
        Some(other) => return Err(FormatError::invalid("textAlign", other, at)),
    }

    Ok(image)
}

fn marks_from_json(marks: Vec<JsonMark>, at: &Path) -> Result<MarkSet, FormatError> {
    let mut set = MarkSet::new();

    for mark in marks {
        let mark_type = MarkType::from_name(&mark.mark_type).ok_or_else(|| FormatError::UnknownMark {
            kind: mark.mark_type.clone(),
            at: at.clone(),
        })?;

        let parsed = match mark_type {
            MarkType::Link => {
                let attrs = mark.attrs.unwrap_or_default();
                let href = match present(&attrs, "href") {
                    Some(Value::String(href)) if !href.trim().is_empty() => href,
                    Some(Value::String(_)) | None => {
                        return Err(FormatError::missing("link", "href", at))
                    }
                    Some(other) => return Err(FormatError::invalid("href", other, at)),
                };
                Mark::Link {
                    href: normalize_href(href),
                }
            }
            simple => match Mark::simple(simple) {
                Some(mark) => mark,
                None => return Err(FormatError::missing(simple.as_str(), "attrs", at)),
            },
        };

        set.insert(parsed);
    }

    Ok(set)
}
