//! Path flattening
//!
//! Converts a nested [`Value`] into a [`FlatTable`] of path → leaf entries.
//! The walk uses an explicit work stack, so input depth never grows the call
//! stack.

use crate::content_id::ContentId;
use crate::error::FoldError;
use crate::tree::path::{self, KeyPath};
use crate::value::{Scalar, Value};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, instrument};

/// A flat table entry: an original scalar, or the identifier of a folded group
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Scalar(Scalar),
    Link(ContentId),
}

/// Sort key: depth descending, then segment-wise lexicographic ascending
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct FoldKey {
    depth: Reverse<usize>,
    path: KeyPath,
}

impl FoldKey {
    fn new(path: KeyPath) -> Self {
        Self {
            depth: Reverse(path.depth()),
            path,
        }
    }
}

/// Working set of path → leaf entries, kept in fold order
///
/// The first entry is always the deepest remaining path, ties broken
/// lexicographically.
#[derive(Debug, Clone, Default)]
pub struct FlatTable {
    entries: BTreeMap<FoldKey, Leaf>,
    weight: usize,
}

impl FlatTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the depths of all entries; strictly decreases with every fold pass
    pub fn weight(&self) -> usize {
        self.weight
    }

    /// Insert an entry. Returns `false` and leaves the table unchanged if the
    /// path is already present.
    pub fn insert(&mut self, path: KeyPath, leaf: Leaf) -> bool {
        let depth = path.depth();
        let key = FoldKey::new(path);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, leaf);
        self.weight += depth;
        true
    }

    pub fn get(&self, path: &KeyPath) -> Option<&Leaf> {
        self.entries.get(&FoldKey::new(path.clone()))
    }

    /// Entries in fold order
    pub fn iter(&self) -> impl Iterator<Item = (&KeyPath, &Leaf)> {
        self.entries.iter().map(|(k, v)| (&k.path, v))
    }

    pub(crate) fn first_path(&self) -> Option<&KeyPath> {
        self.entries.first_key_value().map(|(k, _)| &k.path)
    }

    pub(crate) fn pop_first(&mut self) -> Option<(KeyPath, Leaf)> {
        let (key, leaf) = self.entries.pop_first()?;
        self.weight -= key.path.depth();
        Some((key.path, leaf))
    }
}

/// Walks a nested value into a [`FlatTable`]
#[derive(Debug, Clone)]
pub struct PathFlattener {
    index_width: usize,
    normalize_keys: bool,
}

impl Default for PathFlattener {
    fn default() -> Self {
        Self {
            index_width: 3,
            normalize_keys: true,
        }
    }
}

impl PathFlattener {
    pub fn new(index_width: usize, normalize_keys: bool) -> Self {
        Self {
            index_width,
            normalize_keys,
        }
    }

    /// Flatten `root` into a table of leaf paths
    ///
    /// The root must be an object or an array. Empty containers contribute no
    /// entries.
    #[instrument(skip_all)]
    pub fn flatten(&self, root: &Value) -> Result<FlatTable, FoldError> {
        if !root.is_container() {
            return Err(FoldError::MalformedInput(
                "top-level evidence must be an object or an array".to_string(),
            ));
        }

        let mut table = FlatTable::new();
        let mut stack: Vec<(KeyPath, &Value)> = vec![(KeyPath::root(), root)];

        while let Some((prefix, value)) = stack.pop() {
            match value {
                Value::Object(members) => {
                    let mut seen = HashSet::with_capacity(members.len());
                    for (name, child) in members {
                        let name = if self.normalize_keys {
                            path::normalize_member_name(name)
                        } else {
                            name.clone()
                        };
                        if !seen.insert(name.clone()) {
                            return Err(FoldError::MalformedInput(format!(
                                "duplicate member '{}' under '{}'",
                                name,
                                prefix.label()
                            )));
                        }
                        stack.push((prefix.child(name), child));
                    }
                }
                Value::Array(items) => {
                    for (index, child) in items.iter().enumerate() {
                        let segment = path::index_segment(index, items.len(), self.index_width);
                        stack.push((prefix.child(segment), child));
                    }
                }
                scalar => {
                    let leaf = scalar.as_scalar().map(Leaf::Scalar).ok_or_else(|| {
                        FoldError::MalformedInput(format!("unexpected value at '{}'", prefix))
                    })?;
                    let label = prefix.label();
                    if !table.insert(prefix, leaf) {
                        return Err(FoldError::MalformedInput(format!(
                            "path '{}' produced twice",
                            label
                        )));
                    }
                }
            }
        }

        debug!(entries = table.len(), weight = table.weight(), "Flattened evidence");
        Ok(table)
    }
}
