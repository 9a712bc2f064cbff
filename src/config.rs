//! Configuration System
//!
//! Layered configuration for the store, the fold and logging. Sources, lowest
//! to highest: built-in defaults, the per-user global file, workspace files,
//! then `EVIDAG_<SECTION>__<KEY>` environment variables.

use crate::logging::LoggingConfig;
use crate::tree::FoldConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidagConfig {
    /// Artifact store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Fold settings
    #[serde(default)]
    pub fold: FoldConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Artifact store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store directory; relative paths are taken from the workspace root
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// File extension of stored blobs
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("nfts")
}

fn default_extension() -> String {
    crate::store::fs::DEFAULT_EXTENSION.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            extension: default_extension(),
        }
    }
}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("Store path cannot be empty".to_string());
        }
        if self.extension.is_empty() {
            return Err("Store extension cannot be empty".to_string());
        }
        if self.extension.contains(['/', '\\', '.']) {
            return Err(format!(
                "Store extension '{}' must be a bare name",
                self.extension
            ));
        }
        Ok(())
    }

    /// Absolute store directory for a workspace
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            workspace_root.join(&self.path)
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Store(String),
    Fold(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Store(msg) => write!(f, "Store: {}", msg),
            ValidationError::Fold(msg) => write!(f, "Fold: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl EvidagConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.store.validate() {
            errors.push(ValidationError::Store(e));
        }
        if let Err(e) = self.fold.validate() {
            errors.push(ValidationError::Fold(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
