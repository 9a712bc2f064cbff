//! CLI command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name string for the command span (e.g. "build", "verify").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Build { .. } => "build",
        Commands::Show { .. } => "show",
        Commands::Resolve { .. } => "resolve",
        Commands::Expand { .. } => "expand",
        Commands::Verify { .. } => "verify",
        Commands::List { .. } => "list",
    }
}
