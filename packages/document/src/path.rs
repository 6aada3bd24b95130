//! Index paths addressing nodes from the root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered sequence of child indices starting at the root `doc` node.
///
/// The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Split into parent path and index within the parent.
    ///
    /// Returns `None` for the root, which has no parent slot.
    pub fn split_last(&self) -> Option<(Path, usize)> {
        let (last, parent) = self.0.split_last()?;
        Some((Path(parent.to_vec()), *last))
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_last() {
        let path = Path::from([0, 2, 1]);
        assert_eq!(path.split_last(), Some((Path::from([0, 2]), 1)));
        assert_eq!(Path::root().split_last(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Path::from([0, 3]).to_string(), "[0, 3]");
        assert_eq!(Path::root().to_string(), "[]");
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&Path::from([1, 0])).unwrap();
        assert_eq!(json, "[1,0]");
    }
}
