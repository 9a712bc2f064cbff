//! Graph builder: folds an evidence tree into a Merkle-DAG of stored blobs

use crate::content_id::{ContentId, HashAlgorithm};
use crate::error::FoldError;
use crate::store::{ArtifactRecord, ArtifactStore};
use crate::tree::canonical::{Blob, Canonicalizer, ScalarEncoding};
use crate::tree::flatten::{Leaf, PathFlattener};
use crate::tree::group::{take_deepest_group, BlobLayout};
use crate::tree::hasher::{ContentAddresser, DEFAULT_MAX_BLOB_BYTES};
use crate::tree::path::KeyPath;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Fold configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldConfig {
    /// How scalar members are rendered in blobs
    #[serde(default)]
    pub scalar_encoding: ScalarEncoding,

    /// Minimum digit count of array index segments
    #[serde(default = "default_index_width")]
    pub index_width: usize,

    /// NFC-normalize object member names
    #[serde(default = "default_true")]
    pub normalize_keys: bool,

    /// Upper bound for one canonical blob
    #[serde(default = "default_max_blob_bytes")]
    pub max_blob_bytes: usize,
}

fn default_index_width() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_max_blob_bytes() -> usize {
    DEFAULT_MAX_BLOB_BYTES
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            scalar_encoding: ScalarEncoding::default(),
            index_width: default_index_width(),
            normalize_keys: default_true(),
            max_blob_bytes: default_max_blob_bytes(),
        }
    }
}

impl FoldConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.index_width == 0 {
            return Err("index_width must be at least 1".to_string());
        }
        if self.max_blob_bytes == 0 {
            return Err("max_blob_bytes must be positive".to_string());
        }
        Ok(())
    }
}

/// One resolved group, in resolution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldStep {
    /// Fold pass number, starting at 1
    pub pass: usize,
    /// Group prefix path, or `root`
    pub label: String,
    pub id: ContentId,
    pub blob: String,
    pub members: usize,
}

/// Result of a complete fold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagBuild {
    pub root: ContentId,
    pub leaf_count: usize,
    pub steps: Vec<FoldStep>,
}

/// Folds evidence trees into content-addressed blobs
///
/// Every group is persisted before its identifier is folded into the parent,
/// so a returned root always refers to a fully stored DAG.
pub struct GraphBuilder<'s> {
    store: &'s dyn ArtifactStore,
    config: FoldConfig,
}

impl<'s> GraphBuilder<'s> {
    pub fn new(store: &'s dyn ArtifactStore) -> Self {
        Self {
            store,
            config: FoldConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FoldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    /// Fold `evidence` bottom-up and return the DAG root with the trace of
    /// every resolved group.
    #[instrument(skip_all, fields(encoding = ?self.config.scalar_encoding))]
    pub fn build(&self, evidence: &Value) -> Result<DagBuild, FoldError> {
        let start = Instant::now();
        info!("Starting evidence fold");

        let flattener = PathFlattener::new(self.config.index_width, self.config.normalize_keys);
        let canonicalizer = Canonicalizer::new(self.config.scalar_encoding);
        let addresser = ContentAddresser::new(HashAlgorithm::Blake3, self.config.max_blob_bytes);

        let mut table = flattener.flatten(evidence)?;
        let leaf_count = table.len();
        let mut steps = Vec::new();

        let root = if table.is_empty() {
            // Nothing to fold: the root blob is the empty container.
            let layout = match evidence {
                Value::Array(_) => BlobLayout::Array,
                _ => BlobLayout::Object,
            };
            let blob = canonicalizer.render(layout, &[]);
            self.emit(&addresser, 1, &KeyPath::root().label(), blob, 0, &mut steps)?
        } else {
            let mut pass = 0;
            loop {
                pass += 1;
                let weight_before = table.weight();

                let group = take_deepest_group(&mut table).ok_or_else(|| {
                    FoldError::Invariant("table drained before the root group".to_string())
                })?;
                let label = group.label();
                let blob = canonicalizer.canonicalize(&group);
                let id = self.emit(&addresser, pass, &label, blob, group.members.len(), &mut steps)?;

                if group.is_root() {
                    if !table.is_empty() {
                        error!(remaining = table.len(), "Root group resolved early");
                        return Err(FoldError::Invariant(format!(
                            "{} entries remain after the root group",
                            table.len()
                        )));
                    }
                    break id;
                }

                if !table.insert(group.prefix, Leaf::Link(id)) {
                    return Err(FoldError::Invariant(format!(
                        "folded path '{}' already present",
                        label
                    )));
                }
                if table.weight() >= weight_before {
                    return Err(FoldError::Invariant(format!(
                        "pass {} made no progress (weight {} -> {})",
                        pass,
                        weight_before,
                        table.weight()
                    )));
                }
            }
        };

        info!(
            root = %root,
            leaves = leaf_count,
            groups = steps.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Evidence fold completed"
        );

        Ok(DagBuild {
            root,
            leaf_count,
            steps,
        })
    }

    /// Address and persist one blob, recording the step
    fn emit(
        &self,
        addresser: &ContentAddresser,
        pass: usize,
        label: &str,
        blob: Blob,
        members: usize,
        steps: &mut Vec<FoldStep>,
    ) -> Result<ContentId, FoldError> {
        let id = addresser.address(label, &blob)?;

        self.store
            .put(&ArtifactRecord::new(id, blob.text.clone()))
            .map_err(|source| {
                error!(id = %id, group = label, "Failed to persist blob: {}", source);
                FoldError::PersistFailure {
                    id,
                    blob: blob.text.clone(),
                    source,
                }
            })?;

        debug!(pass, group = label, id = %id, members, "Resolved group");
        steps.push(FoldStep {
            pass,
            label: label.to_string(),
            id,
            blob: blob.text,
            members,
        });
        Ok(id)
    }
}
