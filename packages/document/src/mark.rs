//! Inline marks applied to text runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mark discriminant, also the key of a [`MarkSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkType {
    Bold,
    Italic,
    Underline,
    Link,
}

impl MarkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkType::Bold => "bold",
            MarkType::Italic => "italic",
            MarkType::Underline => "underline",
            MarkType::Link => "link",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(MarkType::Bold),
            "italic" => Some(MarkType::Italic),
            "underline" => Some(MarkType::Underline),
            "link" => Some(MarkType::Link),
            _ => None,
        }
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inline decoration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Link { href: String },
}

impl Mark {
    /// Link mark with a normalized href
    pub fn link(href: &str) -> Self {
        Mark::Link {
            href: normalize_href(href),
        }
    }

    pub fn mark_type(&self) -> MarkType {
        match self {
            Mark::Bold => MarkType::Bold,
            Mark::Italic => MarkType::Italic,
            Mark::Underline => MarkType::Underline,
            Mark::Link { .. } => MarkType::Link,
        }
    }

    /// Attribute-free mark for a type; `None` for `link`, which needs an href
    pub fn simple(mark_type: MarkType) -> Option<Self> {
        match mark_type {
            MarkType::Bold => Some(Mark::Bold),
            MarkType::Italic => Some(Mark::Italic),
            MarkType::Underline => Some(Mark::Underline),
            MarkType::Link => None,
        }
    }
}

/// Prefix `https://` onto hrefs that carry no `http(s)` scheme.
///
/// Surrounding whitespace is trimmed; an empty href stays empty.
pub fn normalize_href(href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        href.to_string()
    } else {
        format!("https://{}", href)
    }
}

/// Set of marks on one text node, at most one per [`MarkType`].
///
/// Kept sorted by type so equal sets compare and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MarkSet(Vec<Mark>);

impl MarkSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, mark_type: MarkType) -> bool {
        self.get(mark_type).is_some()
    }

    pub fn get(&self, mark_type: MarkType) -> Option<&Mark> {
        self.0.iter().find(|m| m.mark_type() == mark_type)
    }

    /// Insert a mark, replacing any existing mark of the same type
    pub fn insert(&mut self, mark: Mark) {
        let mark_type = mark.mark_type();
        match self.0.binary_search_by_key(&mark_type, Mark::mark_type) {
            Ok(pos) => self.0[pos] = mark,
            Err(pos) => self.0.insert(pos, mark),
        }
    }

    pub fn remove(&mut self, mark_type: MarkType) -> Option<Mark> {
        let pos = self.0.iter().position(|m| m.mark_type() == mark_type)?;
        Some(self.0.remove(pos))
    }

    pub fn with(mut self, mark: Mark) -> Self {
        self.insert(mark);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mark> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Mark> for MarkSet {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        let mut set = MarkSet::new();
        for mark in iter {
            set.insert(mark);
        }
        set
    }
}
