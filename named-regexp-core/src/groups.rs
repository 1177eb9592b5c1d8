//! Group index map for capture groups
//!
//! Tracks every capturing group seen while scanning a pattern, in order of its
//! opening parenthesis, and maps group names to their 1-based index. This is
//! what lets a numbered-group match be read back by name.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Information about a capture group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    /// The index of the group (1-based, group 0 is the whole match)
    pub index: usize,
    /// The name of the group, if it was annotated with `(?<name>`
    pub name: Option<String>,
    /// Byte offset of the opening `(` in the original pattern
    pub offset: usize,
}

impl GroupInfo {
    /// Whether this is a named group
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// Name to index map for the capture groups of one pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndices {
    /// All capturing groups, position `i` holds group `i + 1`
    groups: Vec<GroupInfo>,
    /// Map from group name to the index of its last occurrence
    name_to_index: BTreeMap<String, usize>,
}

impl GroupIndices {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the next capture group and return its index
    ///
    /// Indices are handed out sequentially starting at 1. When `name` is
    /// already present the map is updated to point at the new group; the
    /// earlier group stays reachable through [`GroupIndices::get_by_index`].
    pub fn register_group(&mut self, name: Option<&str>, offset: usize) -> usize {
        let index = self.groups.len() + 1;

        if let Some(name) = name {
            if let Some(previous) = self.name_to_index.insert(name.to_string(), index) {
                log::trace!("group name '{name}' redefined: {previous} -> {index}");
            }
        }

        self.groups.push(GroupInfo {
            index,
            name: name.map(str::to_string),
            offset,
        });
        index
    }

    /// Get the index bound to `name`, `None` for unknown names
    pub fn get(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Check if a group name exists
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Get group info by its 1-based index
    pub fn get_by_index(&self, index: usize) -> Option<&GroupInfo> {
        index.checked_sub(1).and_then(|i| self.groups.get(i))
    }

    /// Total number of capture groups, named or not
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of distinct group names
    pub fn len(&self) -> usize {
        self.name_to_index.len()
    }

    /// True when the pattern has no named groups
    pub fn is_empty(&self) -> bool {
        self.name_to_index.is_empty()
    }

    /// All capture groups in order of appearance
    pub fn groups(&self) -> &[GroupInfo] {
        &self.groups
    }

    /// Iterate over `(name, index)` pairs, ordered by name
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.name_to_index.iter())
    }

    /// Iterate over the known group names, ordered by name
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.name_to_index.keys().map(String::as_str)
    }
}

/// Iterator over the `(name, index)` pairs of a [`GroupIndices`]
#[derive(Debug, Clone)]
pub struct Iter<'a>(btree_map::Iter<'a, String, usize>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(name, &index)| (name.as_str(), index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a GroupIndices {
    type Item = (&'a str, usize);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
