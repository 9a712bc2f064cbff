//! Loader entry points: assemble the source layers and deserialize.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::EvidagConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    ///
    /// Layers: defaults, global file, `config/config.toml`,
    /// `config/{EVIDAG_ENV}.toml`, then environment variables.
    pub fn load(workspace_root: &Path) -> Result<EvidagConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: EvidagConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from one explicit file instead of the file layers
    ///
    /// Defaults and environment variables still apply.
    pub fn load_from_file(path: &Path) -> Result<EvidagConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);

        let config: EvidagConfig = builder.build()?.try_deserialize()?;
        debug!(file = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Path of the per-user global config file
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
