//! Error types raised by repository implementations.

use game_core::RecordFormatError;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("preference store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("history record cannot be written: {0}")]
    Format(#[from] RecordFormatError),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
