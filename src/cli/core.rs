use std::io;

use thiserror::Error;

use crate::errors::BookError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Book(#[from] BookError),
    #[error("{0}")]
    Usage(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not split arguments: {0}")]
    Parse(#[from] shell_words::ParseError),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;
