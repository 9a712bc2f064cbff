//! Filesystem artifact store
//!
//! One file per blob, named by its identifier: `{root}/{content_id}.{ext}`.
//! The blob bytes are written verbatim, so a stored file can be hashed by any
//! BLAKE3 tool to confirm its name.

use crate::content_id::ContentId;
use crate::error::StorageError;
use crate::store::{ArtifactRecord, ArtifactStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Default artifact file extension
pub const DEFAULT_EXTENSION: &str = "nft";

/// Content-addressed artifact storage on the local filesystem
pub struct FsArtifactStore {
    root: PathBuf,
    extension: String,
}

impl FsArtifactStore {
    /// Open (creating if needed) a store at `root`
    ///
    /// A directory that cannot be created, or that is read-only, is a fatal
    /// `StoreUnavailable` error.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StorageError> {
        Self::with_extension(root, DEFAULT_EXTENSION)
    }

    pub fn with_extension<P: AsRef<Path>>(root: P, extension: &str) -> Result<Self, StorageError> {
        let requested = root.as_ref().to_path_buf();

        fs::create_dir_all(&requested).map_err(|e| StorageError::StoreUnavailable {
            path: requested.clone(),
            reason: format!("failed to create directory: {}", e),
        })?;

        let root = dunce::canonicalize(&requested).map_err(|e| StorageError::StoreUnavailable {
            path: requested.clone(),
            reason: format!("failed to resolve directory: {}", e),
        })?;

        let metadata = fs::metadata(&root).map_err(|e| StorageError::StoreUnavailable {
            path: root.clone(),
            reason: e.to_string(),
        })?;
        if !metadata.is_dir() {
            return Err(StorageError::StoreUnavailable {
                path: root,
                reason: "not a directory".to_string(),
            });
        }
        if metadata.permissions().readonly() {
            return Err(StorageError::StoreUnavailable {
                path: root,
                reason: "directory is read-only".to_string(),
            });
        }

        debug!(store = %root.display(), "Opened artifact store");
        Ok(Self {
            root,
            extension: extension.to_string(),
        })
    }

    /// Get the root path of this storage
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `id`
    pub fn artifact_path(&self, id: &ContentId) -> PathBuf {
        self.root.join(format!("{}.{}", id, self.extension))
    }

    /// Whether the file at `path` hashes to `id`
    fn holds_intact(&self, path: &Path, id: &ContentId) -> Result<bool, StorageError> {
        let bytes = fs::read(path).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to read artifact from {:?}: {}", path, e),
            ))
        })?;
        Ok(ContentId::compute(id.algorithm(), &bytes) == *id)
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let temp_path = path.with_extension(format!("{}.tmp", self.extension));
        fs::write(&temp_path, bytes).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to write artifact to {:?}: {}", temp_path, e),
            ))
        })?;

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file to {:?}: {}", path, e),
            ))
        })
    }
}

impl ArtifactStore for FsArtifactStore {
    /// Store a record to disk
    ///
    /// Uses atomic writes (write to .tmp, then rename). The identifier is
    /// recomputed from the blob first; a mismatch is rejected. An existing file
    /// is only trusted if it still hashes to its name, otherwise it is
    /// rewritten.
    fn put(&self, record: &ArtifactRecord) -> Result<(), StorageError> {
        record.verify()?;

        let path = self.artifact_path(&record.id);
        if path.exists() {
            if self.holds_intact(&path, &record.id)? {
                trace!(id = %record.id, "Artifact already stored");
                return Ok(());
            }
            warn!(id = %record.id, path = %path.display(), "Replacing damaged artifact");
        }

        self.write_atomic(&path, record.blob.as_bytes())?;

        trace!(id = %record.id, bytes = record.blob.len(), "Stored artifact");
        Ok(())
    }

    /// Retrieve a record by identifier
    ///
    /// Returns an error if the file exists but does not hash to its name.
    fn get(&self, id: &ContentId) -> Result<Option<ArtifactRecord>, StorageError> {
        let path = self.artifact_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to read artifact from {:?}: {}", path, e),
            ))
        })?;

        let actual = ContentId::compute(id.algorithm(), &bytes);
        if actual != *id {
            return Err(StorageError::HashMismatch {
                expected: *id,
                actual,
            });
        }

        let blob = String::from_utf8(bytes).map_err(|e| StorageError::CorruptBlob {
            id: *id,
            reason: e.to_string(),
        })?;

        Ok(Some(ArtifactRecord::new(*id, blob)))
    }

    fn exists(&self, id: &ContentId) -> Result<bool, StorageError> {
        Ok(self.artifact_path(id).exists())
    }

    fn list(&self) -> Result<Vec<ContentId>, StorageError> {
        let suffix = format!(".{}", self.extension);
        let mut ids = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                StorageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to list {:?}: {}", self.root, e),
                ))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            let Some(stem) = name.strip_suffix(&suffix) else {
                continue;
            };
            match stem.parse::<ContentId>() {
                Ok(id) => ids.push(id),
                Err(_) => warn!(file = %name, "Ignoring foreign file in artifact store"),
            }
        }

        ids.sort();
        Ok(ids)
    }
}
