//! Error types for the evidence DAG builder.

use crate::content_id::ContentId;
use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Artifact not found: {0}")]
    NotFound(ContentId),

    #[error("Hash mismatch: expected {expected}, got {actual}")]
    HashMismatch {
        expected: ContentId,
        actual: ContentId,
    },

    #[error("Artifact store unavailable at {path:?}: {reason}")]
    StoreUnavailable { path: PathBuf, reason: String },

    #[error("Invalid content identifier: {0}")]
    InvalidContentId(String),

    #[error("Corrupt blob {id}: {reason}")]
    CorruptBlob { id: ContentId, reason: String },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that abort a fold run. No root produced alongside one of these is trusted.
#[derive(Debug, Error)]
pub enum FoldError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Hashing failed for group '{label}': {reason}")]
    HashingFailure { label: String, reason: String },

    #[error("Failed to persist {id} ({blob}): {source}")]
    PersistFailure {
        id: ContentId,
        blob: String,
        #[source]
        source: StorageError,
    },

    #[error("Fold invariant violated: {0}")]
    Invariant(String),
}

/// Top-level errors surfaced by the CLI and facade operations
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Fold failed: {0}")]
    Fold(#[from] FoldError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Path not found in DAG: {0}")]
    PathNotFound(String),

    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
