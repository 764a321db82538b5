use picker_core::ColorId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("colors unavailable: {0}")]
    Unavailable(String),
    #[error("color {0} not found")]
    NotFound(ColorId),
    #[error("persisting selection failed: {0}")]
    PersistFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("save cancelled")]
    Cancelled,
}

impl SaveError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SaveError::Cancelled)
    }
}
