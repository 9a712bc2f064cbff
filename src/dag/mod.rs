//! DAG reading
//!
//! Walks stored blobs from a root identifier. Any sub-tree can be reached by
//! following one blob per path segment, without loading the rest of the DAG.

pub mod verify;

pub use verify::{verify, VerifyReport};

use crate::content_id::ContentId;
use crate::error::{ApiError, StorageError};
use crate::store::ArtifactStore;
use crate::tree::group::BlobLayout;
use crate::tree::path::{self, KeyPath};
use serde_json::Value as JsonValue;
use tracing::{debug, instrument};

/// Default bound on expansion depth
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A blob member as read back from the store
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Scalar as encoded in the blob (a string under the text encoding)
    Scalar(JsonValue),
    /// Reference to a child blob
    Link(ContentId),
}

/// A parsed blob
#[derive(Debug, Clone, PartialEq)]
pub struct DagNode {
    pub id: ContentId,
    pub layout: BlobLayout,
    /// Member name (object) or position (array), in canonical order
    pub members: Vec<(String, Member)>,
}

impl DagNode {
    /// Look up a member by path segment. Array nodes accept any index segment
    /// (`"2"`, `"002"`) and treat it as a position in the stored array. That
    /// position differs from the input index when empty elements were dropped
    /// or an all-index object was compacted.
    pub fn member(&self, segment: &str) -> Option<&Member> {
        match self.layout {
            BlobLayout::Object => self
                .members
                .iter()
                .find(|(name, _)| name == segment)
                .map(|(_, m)| m),
            BlobLayout::Array => {
                let index = usize::try_from(path::parse_index(segment)?).ok()?;
                self.members.get(index).map(|(_, m)| m)
            }
        }
    }

    /// Identifiers of child blobs
    pub fn links(&self) -> impl Iterator<Item = &ContentId> {
        self.members.iter().filter_map(|(_, m)| match m {
            Member::Link(id) => Some(id),
            Member::Scalar(_) => None,
        })
    }
}

/// Parse blob text into a node
///
/// A string member that parses as a content identifier is a child reference.
pub fn parse_blob(id: ContentId, blob: &str) -> Result<DagNode, StorageError> {
    let parsed: JsonValue = serde_json::from_str(blob).map_err(|e| StorageError::CorruptBlob {
        id,
        reason: e.to_string(),
    })?;

    let classify = |value: JsonValue| match value {
        JsonValue::String(s) => match s.parse::<ContentId>() {
            Ok(link) => Member::Link(link),
            Err(_) => Member::Scalar(JsonValue::String(s)),
        },
        other => Member::Scalar(other),
    };

    match parsed {
        JsonValue::Object(map) => {
            let mut members: Vec<(String, Member)> =
                map.into_iter().map(|(k, v)| (k, classify(v))).collect();
            members.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            Ok(DagNode {
                id,
                layout: BlobLayout::Object,
                members,
            })
        }
        JsonValue::Array(items) => Ok(DagNode {
            id,
            layout: BlobLayout::Array,
            members: items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), classify(v)))
                .collect(),
        }),
        other => Err(StorageError::CorruptBlob {
            id,
            reason: format!("expected an object or array, found {}", other),
        }),
    }
}

/// Result of resolving a path
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Link(ContentId),
    Scalar(JsonValue),
}

/// Reads and navigates stored DAGs
pub struct DagReader<'s> {
    store: &'s dyn ArtifactStore,
    max_depth: usize,
}

impl<'s> DagReader<'s> {
    pub fn new(store: &'s dyn ArtifactStore) -> Self {
        Self {
            store,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Raw blob text
    pub fn blob(&self, id: &ContentId) -> Result<String, ApiError> {
        let record = self
            .store
            .get(id)?
            .ok_or(StorageError::NotFound(*id))?;
        Ok(record.blob)
    }

    /// Load and parse one blob
    pub fn read(&self, id: &ContentId) -> Result<DagNode, ApiError> {
        let blob = self.blob(id)?;
        Ok(parse_blob(*id, &blob)?)
    }

    /// Follow `path` from `root`, reading one blob per segment
    #[instrument(skip(self), fields(root = %root, path = %path))]
    pub fn resolve(&self, root: &ContentId, path: &KeyPath) -> Result<Resolved, ApiError> {
        let mut current = Resolved::Link(*root);

        for (depth, segment) in path.segments().iter().enumerate() {
            let id = match &current {
                Resolved::Link(id) => *id,
                Resolved::Scalar(_) => {
                    return Err(ApiError::PathNotFound(format!(
                        "{} (segment '{}' is below a scalar)",
                        path,
                        path.segments()[depth - 1]
                    )))
                }
            };
            let node = self.read(&id)?;
            current = match node.member(segment) {
                Some(Member::Link(child)) => Resolved::Link(*child),
                Some(Member::Scalar(value)) => Resolved::Scalar(value.clone()),
                None => return Err(ApiError::PathNotFound(path.to_string())),
            };
        }

        debug!(blobs_read = path.depth(), "Resolved path");
        Ok(current)
    }

    /// Rebuild the nested tree rooted at `root`
    ///
    /// Scalars come back as they were encoded; objects whose member names were
    /// all indices come back as arrays.
    pub fn expand(&self, root: &ContentId) -> Result<JsonValue, ApiError> {
        self.expand_at(root, 0)
    }

    fn expand_at(&self, id: &ContentId, depth: usize) -> Result<JsonValue, ApiError> {
        if depth >= self.max_depth {
            return Err(ApiError::VerificationFailed(format!(
                "DAG deeper than {} levels at {}",
                self.max_depth, id
            )));
        }

        let node = self.read(id)?;
        let mut expanded = Vec::with_capacity(node.members.len());
        for (name, member) in node.members {
            let value = match member {
                Member::Link(child) => self.expand_at(&child, depth + 1)?,
                Member::Scalar(value) => value,
            };
            expanded.push((name, value));
        }

        Ok(match node.layout {
            BlobLayout::Object => JsonValue::Object(expanded.into_iter().collect()),
            BlobLayout::Array => JsonValue::Array(expanded.into_iter().map(|(_, v)| v).collect()),
        })
    }
}
