use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Error type shared by the service, storage, and configuration layers.
///
/// The balance calculation and the table pipeline never produce one of
/// these: malformed numbers degrade to zero instead.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("Deal {0} is completed or cancelled and can no longer change")]
    DealLocked(Uuid),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, BookError>;

impl BookError {
    pub fn deal_not_found(id: Uuid) -> Self {
        BookError::NotFound { entity: "Deal", id }
    }

    pub fn bill_not_found(id: Uuid) -> Self {
        BookError::NotFound { entity: "Bill", id }
    }
}

impl From<std::io::Error> for BookError {
    fn from(err: std::io::Error) -> Self {
        BookError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BookError {
    fn from(err: serde_json::Error) -> Self {
        BookError::StorageError(err.to_string())
    }
}
