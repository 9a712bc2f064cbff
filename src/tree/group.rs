//! Bottom-up grouping over the flat table
//!
//! Each call to [`take_deepest_group`] removes the maximal run of entries
//! that share an immediate parent at the deepest remaining level. Because the
//! table is ordered by depth and then segment-wise, that run is contiguous at
//! the front of the table, so one scan from the front yields the whole group.

use crate::tree::flatten::{FlatTable, Leaf};
use crate::tree::path::{self, KeyPath};

/// Blob shape chosen for a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobLayout {
    /// At least one member name is not an array index
    Object,
    /// Every member name is a non-negative integer
    Array,
}

/// Entries that fold into one blob
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Shared parent path; empty for the root group
    pub prefix: KeyPath,
    /// Last path segment of each member, with its leaf, in table order
    pub members: Vec<(String, Leaf)>,
}

impl Group {
    pub fn is_root(&self) -> bool {
        self.prefix.is_root()
    }

    pub fn label(&self) -> String {
        self.prefix.label()
    }

    pub fn layout(&self) -> BlobLayout {
        if !self.members.is_empty()
            && self
                .members
                .iter()
                .all(|(name, _)| path::parse_index(name).is_some())
        {
            BlobLayout::Array
        } else {
            BlobLayout::Object
        }
    }
}

/// Remove and return the next group to fold, or `None` if the table is empty
///
/// The first entry anchors the group prefix; entries are absorbed while their
/// prefix equals the anchor, and the scan stops at the first mismatch.
pub fn take_deepest_group(table: &mut FlatTable) -> Option<Group> {
    let anchor = table.first_path()?.split_last()?.0;

    let mut members = Vec::new();
    while let Some(next) = table.first_path() {
        match next.split_last() {
            Some((prefix, _)) if prefix == anchor => {}
            _ => break,
        }
        let Some((path, leaf)) = table.pop_first() else {
            break;
        };
        if let Some((_, name)) = path.split_last() {
            members.push((name.to_string(), leaf));
        }
    }

    Some(Group {
        prefix: anchor,
        members,
    })
}
