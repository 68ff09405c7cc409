//! Studio error types.

use thiserror::Error;

pub type StudioResult<T> = Result<T, StudioError>;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Logging setup failed: {0}")]
    LoggingError(String),

    #[error("Storage error: {0}")]
    Storage(#[from] pvid_storage::StorageError),

    #[error("Render error: {0}")]
    Render(#[from] pvid_render::RenderError),
}

impl StudioError {
    pub fn logging_error(msg: impl Into<String>) -> Self {
        Self::LoggingError(msg.into())
    }
}
