//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::{Commands, EncodingArg, OutputFormat};
use crate::cli::presentation::{
    format_build_result, format_list_result, format_resolved, format_verify_report,
};
use crate::config::{ConfigLoader, EvidagConfig};
use crate::content_id::ContentId;
use crate::dag::{self, DagReader};
use crate::error::ApiError;
use crate::evidence::load_evidence_file;
use crate::store::{ArtifactStore, FsArtifactStore, MemoryArtifactStore};
use crate::tree::path::KeyPath;
use crate::tree::{GraphBuilder, ScalarEncoding};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, info_span};

/// Runtime context for CLI execution: workspace and loaded configuration.
/// The artifact store is opened per command, so dry runs never touch disk.
pub struct RunContext {
    workspace_root: PathBuf,
    config: EvidagConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::with_config(workspace_root, config)
    }

    /// Create run context from an already loaded configuration
    pub fn with_config(workspace_root: PathBuf, config: EvidagConfig) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &EvidagConfig {
        &self.config
    }

    /// Absolute path of the artifact store directory
    pub fn store_path(&self) -> PathBuf {
        self.config.store.resolve_path(&self.workspace_root)
    }

    fn open_store(&self) -> Result<FsArtifactStore, ApiError> {
        Ok(FsArtifactStore::with_extension(
            self.store_path(),
            &self.config.store.extension,
        )?)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let span = info_span!("command", command = command_name(command));
        let _entered = span.enter();
        let started = Instant::now();

        let result = self.execute_inner(command);

        info!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Build {
                input,
                format,
                encoding,
                dry_run,
            } => self.handle_build(input, *format, *encoding, *dry_run),
            Commands::Show { cid } => {
                let store = self.open_store()?;
                DagReader::new(&store).blob(&parse_cid(cid)?)
            }
            Commands::Resolve { cid, path } => {
                let store = self.open_store()?;
                let resolved =
                    DagReader::new(&store).resolve(&parse_cid(cid)?, &KeyPath::parse(path))?;
                Ok(format_resolved(&resolved))
            }
            Commands::Expand { cid } => {
                let store = self.open_store()?;
                let tree = DagReader::new(&store).expand(&parse_cid(cid)?)?;
                serde_json::to_string_pretty(&tree)
                    .map_err(|e| ApiError::InputError(format!("Failed to render tree: {}", e)))
            }
            Commands::Verify { cid, format } => {
                let store = self.open_store()?;
                let report = dag::verify(&store, &parse_cid(cid)?)?;
                let rendered = format_verify_report(&report, *format);
                if report.is_ok() {
                    Ok(rendered)
                } else {
                    Err(ApiError::VerificationFailed(rendered))
                }
            }
            Commands::List { format } => {
                let store = self.open_store()?;
                let ids = store.list()?;
                Ok(format_list_result(&ids, *format))
            }
        }
    }

    fn handle_build(
        &self,
        input: &Path,
        format: OutputFormat,
        encoding: Option<EncodingArg>,
        dry_run: bool,
    ) -> Result<String, ApiError> {
        let input = if input.is_absolute() {
            input.to_path_buf()
        } else {
            self.workspace_root.join(input)
        };
        let evidence = load_evidence_file(&input)?;

        let mut fold = self.config.fold.clone();
        if let Some(encoding) = encoding {
            fold.scalar_encoding = match encoding {
                EncodingArg::Text => ScalarEncoding::Text,
                EncodingArg::Native => ScalarEncoding::Native,
            };
        }

        let build = if dry_run {
            let store = MemoryArtifactStore::new();
            GraphBuilder::new(&store).with_config(fold).build(&evidence)?
        } else {
            let store = self.open_store()?;
            GraphBuilder::new(&store).with_config(fold).build(&evidence)?
        };

        info!(
            input = %input.display(),
            root = %build.root,
            blobs = build.steps.len(),
            dry_run,
            "Evidence folded"
        );
        Ok(format_build_result(&build, format, dry_run))
    }
}

fn parse_cid(text: &str) -> Result<ContentId, ApiError> {
    Ok(text.trim().parse::<ContentId>()?)
}
