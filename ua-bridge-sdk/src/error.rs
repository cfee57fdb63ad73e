use crate::StatusCode;
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Node store specific errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backend completed the operation with a non-good status.
    #[error("operation failed: {0}")]
    Status(StatusCode),
    /// The backend could not service the operation at all (connection lost,
    /// backend busy). Surfaced to callers as a retryable condition.
    #[error("node store unavailable: {0}")]
    Unavailable(String),
}

impl From<StatusCode> for StoreError {
    fn from(code: StatusCode) -> Self {
        StoreError::Status(code)
    }
}
