//! Content addressing for canonical blobs using BLAKE3

use crate::content_id::{ContentId, HashAlgorithm};
use crate::error::FoldError;
use crate::tree::canonical::Blob;

/// Default upper bound for a single canonical blob (16 MiB)
pub const DEFAULT_MAX_BLOB_BYTES: usize = 16 * 1024 * 1024;

/// Computes content identifiers from canonical blob bytes
///
/// ContentID = {version, hash function, BLAKE3(blob bytes)}
///
/// The digest covers exactly the blob bytes, with no framing or domain tag, so
/// anyone holding a blob can recompute its identifier.
#[derive(Debug, Clone, Copy)]
pub struct ContentAddresser {
    algorithm: HashAlgorithm,
    max_blob_bytes: usize,
}

impl Default for ContentAddresser {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Blake3,
            max_blob_bytes: DEFAULT_MAX_BLOB_BYTES,
        }
    }
}

impl ContentAddresser {
    pub fn new(algorithm: HashAlgorithm, max_blob_bytes: usize) -> Self {
        Self {
            algorithm,
            max_blob_bytes,
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Address a group's blob
    ///
    /// Fails with `HashingFailure` when the blob exceeds the configured size
    /// bound.
    pub fn address(&self, label: &str, blob: &Blob) -> Result<ContentId, FoldError> {
        if blob.len() > self.max_blob_bytes {
            return Err(FoldError::HashingFailure {
                label: label.to_string(),
                reason: format!(
                    "blob is {} bytes, limit is {}",
                    blob.len(),
                    self.max_blob_bytes
                ),
            });
        }
        Ok(self.address_bytes(blob.as_bytes()))
    }

    /// Address raw bytes
    pub fn address_bytes(&self, data: &[u8]) -> ContentId {
        ContentId::compute(self.algorithm, data)
    }
}
