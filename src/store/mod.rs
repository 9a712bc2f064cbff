//! Artifact Store
//!
//! Persists `(ContentId, blob)` pairs keyed by their identifier. Writes are
//! idempotent: storing the same blob again leaves the store unchanged.

pub mod fs;
pub mod memory;

pub use fs::FsArtifactStore;
pub use memory::MemoryArtifactStore;

use crate::content_id::ContentId;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};

/// A persisted blob and its identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub id: ContentId,
    pub blob: String,
}

impl ArtifactRecord {
    pub fn new(id: ContentId, blob: impl Into<String>) -> Self {
        Self {
            id,
            blob: blob.into(),
        }
    }

    /// Check that the identifier is the hash of the blob
    pub fn verify(&self) -> Result<(), StorageError> {
        let actual = ContentId::compute(self.id.algorithm(), self.blob.as_bytes());
        if actual != self.id {
            return Err(StorageError::HashMismatch {
                expected: self.id,
                actual,
            });
        }
        Ok(())
    }
}

/// Content-addressed artifact store interface
pub trait ArtifactStore {
    /// Store a record. A record whose identifier is already present is a no-op.
    fn put(&self, record: &ArtifactRecord) -> Result<(), StorageError>;

    /// Retrieve a record. Returns `None` if absent.
    fn get(&self, id: &ContentId) -> Result<Option<ArtifactRecord>, StorageError>;

    fn exists(&self, id: &ContentId) -> Result<bool, StorageError>;

    /// All stored identifiers, sorted
    fn list(&self) -> Result<Vec<ContentId>, StorageError>;
}
