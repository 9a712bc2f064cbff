//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, EncodingArg, OutputFormat};
pub use presentation::{
    format_build_result, format_list_result, format_resolved, format_verify_report,
};
pub use route::RunContext;
