//! Merge rules: defaults, override order, conflict handling.

use crate::tree::hasher::DEFAULT_MAX_BLOB_BYTES;
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("store.path", "nfts")?
        .set_default("store.extension", crate::store::fs::DEFAULT_EXTENSION)?
        .set_default("fold.scalar_encoding", "text")?
        .set_default("fold.index_width", 3_i64)?
        .set_default("fold.normalize_keys", true)?
        .set_default("fold.max_blob_bytes", DEFAULT_MAX_BLOB_BYTES as i64)
}
