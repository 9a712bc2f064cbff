//! In-memory artifact store for dry runs and tests

use crate::content_id::ContentId;
use crate::error::StorageError;
use crate::store::{ArtifactRecord, ArtifactStore};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    records: RwLock<BTreeMap<ContentId, String>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Snapshot of every stored record, ordered by identifier
    pub fn records(&self) -> Vec<ArtifactRecord> {
        self.records
            .read()
            .iter()
            .map(|(id, blob)| ArtifactRecord::new(*id, blob.clone()))
            .collect()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn put(&self, record: &ArtifactRecord) -> Result<(), StorageError> {
        record.verify()?;
        self.records
            .write()
            .entry(record.id)
            .or_insert_with(|| record.blob.clone());
        Ok(())
    }

    fn get(&self, id: &ContentId) -> Result<Option<ArtifactRecord>, StorageError> {
        Ok(self
            .records
            .read()
            .get(id)
            .map(|blob| ArtifactRecord::new(*id, blob.clone())))
    }

    fn exists(&self, id: &ContentId) -> Result<bool, StorageError> {
        Ok(self.records.read().contains_key(id))
    }

    fn list(&self) -> Result<Vec<ContentId>, StorageError> {
        Ok(self.records.read().keys().copied().collect())
    }
}
