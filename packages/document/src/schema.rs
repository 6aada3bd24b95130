//! Which node types may contain which.

use crate::node::NodeType;

/// Kinds that sit directly in `doc` and in list items
pub fn is_block(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Paragraph
            | NodeType::Heading
            | NodeType::BulletList
            | NodeType::OrderedList
            | NodeType::TaskList
            | NodeType::HorizontalRule
    )
}

/// Kinds that live inside a textblock
pub fn is_inline(node_type: NodeType) -> bool {
    matches!(node_type, NodeType::Text | NodeType::Image)
}

/// Blocks whose content is inline
pub fn accepts_inline(node_type: NodeType) -> bool {
    matches!(node_type, NodeType::Paragraph | NodeType::Heading)
}

/// Whether `child` may appear directly inside `parent`
pub fn permits(parent: NodeType, child: NodeType) -> bool {
    match parent {
        NodeType::Doc | NodeType::ListItem | NodeType::TaskItem => is_block(child),
        NodeType::Paragraph | NodeType::Heading => is_inline(child),
        NodeType::BulletList | NodeType::OrderedList => child == NodeType::ListItem,
        NodeType::TaskList => child == NodeType::TaskItem,
        NodeType::Image | NodeType::HorizontalRule | NodeType::Text => false,
    }
}
