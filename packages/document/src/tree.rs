//! # Content Tree
//!
//! Immutable document tree with copy-on-write transforms.
//!
//! ## Design
//!
//! - Nodes are addressed by index paths from the root
//! - Transforms rebuild only the nodes on the edited path; all other subtrees
//!   are shared with the source tree
//! - Every transform checks the schema and fails instead of producing an
//!   ill-formed tree
//! - The source tree is never touched, so a failed call leaves it valid

use crate::error::{TreeError, TreeResult};
use crate::node::{Node, NodeKind, NodeType};
use crate::path::Path;
use crate::schema;
use std::sync::Arc;

/// A well-formed document rooted at a `doc` node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTree {
    root: Arc<Node>,
}

impl ContentTree {
    /// Wrap a `doc` node, checking the whole tree
    pub fn new(root: Node) -> TreeResult<Self> {
        if root.node_type() != NodeType::Doc {
            return Err(TreeError::NotADocument(root.node_type()));
        }
        root.validate(&Path::root())?;
        Ok(Self {
            root: Arc::new(root),
        })
    }

    /// The editor's starting document: a single empty paragraph
    pub fn empty() -> Self {
        Self {
            root: Arc::new(Node::doc(vec![Node::paragraph(vec![])])),
        }
    }

    /// Document holding `text` as a single paragraph
    pub fn plain_text(text: &str) -> Self {
        let children = if text.is_empty() {
            vec![]
        } else {
            vec![Node::text(text)]
        };
        Self {
            root: Arc::new(Node::doc(vec![Node::paragraph(children)])),
        }
    }

    /// Wrap a root the crate builds itself and knows to be well-formed
    pub(crate) fn from_trusted(root: Node) -> Self {
        debug_assert!(root.is_well_formed());
        Self {
            root: Arc::new(root),
        }
    }

    pub(crate) fn from_root(root: Arc<Node>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Whether both trees are the same allocation (not just equal)
    pub fn ptr_eq(&self, other: &ContentTree) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    pub fn get(&self, path: &Path) -> TreeResult<&Node> {
        let mut node: &Node = &self.root;
        for &index in path.indices() {
            node = node
                .child(index)
                .ok_or_else(|| TreeError::PathNotFound(path.clone()))?;
        }
        Ok(node)
    }

    /// Shared handle to the node at `path`
    pub fn get_shared(&self, path: &Path) -> TreeResult<Arc<Node>> {
        let mut node = &self.root;
        for &index in path.indices() {
            node = node
                .children
                .get(index)
                .ok_or_else(|| TreeError::PathNotFound(path.clone()))?;
        }
        Ok(Arc::clone(node))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_ok()
    }

    pub fn replace_at(&self, path: &Path, node: Node) -> TreeResult<ContentTree> {
        let Some((parent_path, index)) = path.split_last() else {
            return ContentTree::new(node);
        };

        self.update_node(&parent_path, |parent| {
            if index >= parent.child_count() {
                return Err(TreeError::PathNotFound(path.clone()));
            }
            check_child(parent, &node, path)?;

            let mut children = parent.children.clone();
            children[index] = Arc::new(node);
            Ok(Node {
                kind: parent.kind.clone(),
                children,
            })
        })
    }

    /// Insert `node` as the `index`-th child of the node at `parent_path`.
    ///
    /// `index` may equal the child count to append.
    pub fn insert_child(
        &self,
        parent_path: &Path,
        index: usize,
        node: Node,
    ) -> TreeResult<ContentTree> {
        self.update_node(parent_path, |parent| {
            let len = parent.child_count();
            if index > len {
                return Err(TreeError::InvalidIndex { index, len });
            }
            check_child(parent, &node, &parent_path.child(index))?;

            let mut children = parent.children.clone();
            children.insert(index, Arc::new(node));
            Ok(Node {
                kind: parent.kind.clone(),
                children,
            })
        })
    }

    pub fn remove_at(&self, path: &Path) -> TreeResult<ContentTree> {
        let (parent_path, index) = path
            .split_last()
            .ok_or_else(|| TreeError::PathNotFound(path.clone()))?;

        self.update_node(&parent_path, |parent| {
            if index >= parent.child_count() {
                return Err(TreeError::PathNotFound(path.clone()));
            }

            let mut children = parent.children.clone();
            children.remove(index);
            Ok(Node {
                kind: parent.kind.clone(),
                children,
            })
        })
    }

    /// Rebuild the node at `path` with `f`, copying only its ancestors
    fn update_node<F>(&self, path: &Path, f: F) -> TreeResult<ContentTree>
    where
        F: FnOnce(&Node) -> TreeResult<Node>,
    {
        let root = update_at(&self.root, path.indices(), path, f)?;
        Ok(ContentTree { root })
    }

    /// Number of text characters in the document
    pub fn text_len(&self) -> usize {
        self.root.text_len()
    }

    pub fn text_content(&self) -> String {
        self.root.text_content()
    }

    /// Every node with its path, in document order (pre-order)
    pub fn walk(&self) -> Vec<(Path, &Node)> {
        let mut out = vec![(Path::root(), self.root.as_ref())];
        walk_into(&self.root, Path::root(), &mut out);
        out
    }

    /// Paths of all image nodes
    pub fn images(&self) -> Vec<Path> {
        self.walk()
            .into_iter()
            .filter(|(_, node)| matches!(node.kind(), NodeKind::Image(_)))
            .map(|(path, _)| path)
            .collect()
    }
}

impl Default for ContentTree {
    fn default() -> Self {
        Self::empty()
    }
}

fn check_child(parent: &Node, child: &Node, at: &Path) -> TreeResult<()> {
    if !schema::permits(parent.node_type(), child.node_type()) {
        return Err(TreeError::IllegalChild {
            parent: parent.node_type(),
            child: child.node_type(),
        });
    }
    child.validate(at)
}

fn update_at<F>(node: &Arc<Node>, rest: &[usize], full: &Path, f: F) -> TreeResult<Arc<Node>>
where
    F: FnOnce(&Node) -> TreeResult<Node>,
{
    match rest.split_first() {
        None => Ok(Arc::new(f(node)?)),
        Some((&index, tail)) => {
            let child = node
                .children
                .get(index)
                .ok_or_else(|| TreeError::PathNotFound(full.clone()))?;
            let updated = update_at(child, tail, full, f)?;

            let mut children = node.children.clone();
            children[index] = updated;
            Ok(Arc::new(Node {
                kind: node.kind.clone(),
                children,
            }))
        }
    }
}

fn walk_into<'a>(node: &'a Node, path: Path, out: &mut Vec<(Path, &'a Node)>) {
    for (i, child) in node.children.iter().enumerate() {
        let child_path = path.child(i);
        out.push((child_path.clone(), child.as_ref()));
        walk_into(child, child_path, out);
    }
}
