use std::{
    env,
    io::{self, BufRead, Write},
};

use shell_words::split;

use crate::cli::args::parse_args;
use crate::cli::commands::{execute, CliContext};
use crate::cli::core::CliResult;
use crate::cli::output::{styled, MessageKind};

/// Whole command line in one string, split like a POSIX shell would.
pub const ARGS_ENV: &str = "DEALBOOK_CLI_ARGS";
/// When set, commands are read line by line from stdin.
pub const SCRIPT_ENV: &str = "DEALBOOK_CLI_SCRIPT";

pub fn run_cli() -> CliResult<()> {
    let context = CliContext::new()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if env::var_os(SCRIPT_ENV).is_some() {
        return run_script(&context, io::stdin().lock(), &mut out);
    }

    let mut tokens: Vec<String> = env::args().skip(1).collect();
    if tokens.is_empty() {
        if let Ok(line) = env::var(ARGS_ENV) {
            tokens = split(&line)?;
        }
    }
    run_tokens(&context, &tokens, &mut out)
}

pub fn run_tokens(context: &CliContext, tokens: &[String], out: &mut dyn Write) -> CliResult<()> {
    let command = parse_args(tokens)?;
    tracing::debug!(?command, "dispatching command");
    execute(context, command, out)
}

/// Runs one command per input line. Failures are reported and the script
/// carries on.
pub fn run_script(context: &CliContext, input: impl BufRead, out: &mut dyn Write) -> CliResult<()> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if matches!(trimmed, "exit" | "quit") {
            break;
        }
        let result = split(trimmed)
            .map_err(Into::into)
            .and_then(|tokens| run_tokens(context, &tokens, out));
        if let Err(err) = result {
            eprintln!("{}", styled(MessageKind::Error, &err, context.color));
        }
    }
    Ok(())
}
