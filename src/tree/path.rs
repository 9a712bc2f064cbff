//! Key paths and member-name normalization

use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Separator used when a path is rendered as text
pub const SEPARATOR: char = '.';

/// Label of the implicit root group
pub const ROOT_LABEL: &str = "root";

/// Ordered sequence of path segments from the root of the evidence tree
///
/// Object segments are member names; array segments are zero-padded decimal
/// indices. Ordering is segment-wise lexicographic, which keeps siblings
/// contiguous even when a member name contains [`SEPARATOR`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty path (the root)
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a dotted path. Only usable when no segment contains the separator.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self::from_segments(dotted.split(SEPARATOR))
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path extended by one segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Split into (group prefix, last segment). The root has neither.
    pub fn split_last(&self) -> Option<(KeyPath, &str)> {
        let (last, parent) = self.segments.split_last()?;
        Some((
            KeyPath {
                segments: parent.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// Group label: the dotted path, or `root` for the empty path
    pub fn label(&self) -> String {
        if self.is_root() {
            ROOT_LABEL.to_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Normalize a member name to Unicode NFC so that visually identical keys
/// produce identical paths.
pub fn normalize_member_name(name: &str) -> String {
    name.nfc().collect()
}

/// Zero-padded array index segment
///
/// `width` is raised when needed so that every index of an array of `len`
/// elements has the same number of digits.
pub fn index_segment(index: usize, len: usize, width: usize) -> String {
    let digits = len.saturating_sub(1).to_string().len();
    format!("{:0width$}", index, width = width.max(digits))
}

/// Parse a segment as a non-negative array index
///
/// Only plain ASCII digit strings that fit in a `u64` qualify.
pub fn parse_index(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
