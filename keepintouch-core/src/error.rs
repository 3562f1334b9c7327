//! Error types for keepintouch.

use thiserror::Error;

/// Errors that can occur in keepintouch operations.
#[derive(Error, Debug)]
pub enum KeepInTouchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Contact not found in address book: {0}")]
    ContactNotFound(String),

    #[error("Contact is already tracked: {0}")]
    AlreadyTracked(String),

    #[error("Contact is not tracked: {0}")]
    NotTracked(String),

    #[error("Could not start call: {0}")]
    Dispatch(String),

    #[error("vCard parse error: {0}")]
    VCard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for keepintouch operations.
pub type KeepInTouchResult<T> = Result<T, KeepInTouchError>;
