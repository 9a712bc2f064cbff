//! CLI parse: clap types for evidag. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// evidag - content-addressed evidence DAGs
#[derive(Parser)]
#[command(name = "evidag")]
#[command(about = "Fold build evidence into a content-addressed Merkle-DAG")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (replaces global and workspace config files)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

/// Scalar encoding override for `build`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    Text,
    Native,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fold a JSON or TOML evidence file into the artifact store
    Build {
        /// Evidence file (.json or .toml)
        input: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Scalar encoding (overrides configuration)
        #[arg(long, value_enum)]
        encoding: Option<EncodingArg>,
        /// Compute identifiers without writing to the store
        #[arg(long)]
        dry_run: bool,
    },
    /// Print a stored blob
    Show {
        /// Content identifier
        cid: String,
    },
    /// Resolve a dotted path from a root
    Resolve {
        /// Root content identifier
        cid: String,
        /// Dotted member path, e.g. build.tags.001 (array segments are positions in the stored array)
        path: String,
    },
    /// Print the reconstructed evidence tree as JSON
    Expand {
        /// Root content identifier
        cid: String,
    },
    /// Verify every blob reachable from a root
    ///
    /// Evidence strings that are themselves content identifiers are read as
    /// links, so one that names a blob outside this store is reported as
    /// dangling and fails verification.
    Verify {
        /// Root content identifier
        cid: String,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List stored content identifiers
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}
