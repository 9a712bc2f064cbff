//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, FoldError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Fold(FoldError::PersistFailure { id, blob, source }) => {
            format!("error: failed to persist {}: {}\nblob: {}", id, source, blob)
        }
        other => format!("error: {}", other),
    }
}
