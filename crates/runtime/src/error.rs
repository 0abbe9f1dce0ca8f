//! Unified error type surfaced by the runtime API.

use thiserror::Error;

pub use crate::repository::RepositoryError;
use crate::session::EnemyId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("enemy {0} is not registered in this session")]
    UnknownEnemy(EnemyId),
}
