pub mod args;
pub mod commands;
pub mod core;
pub mod output;
mod shell;
pub mod table_renderer;
pub mod views;

pub use self::core::{CliError, CliResult};
pub use shell::{run_cli, run_script, run_tokens, ARGS_ENV, SCRIPT_ENV};
