use thiserror::Error;
use vcfmaker_service::error::ServiceError;

/// Application-level errors (command-line layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    CoreError(#[from] vcfmaker_core::error::CoreError),

    #[error("Conversion worker failed: {0}")]
    WorkerError(String),
}

impl AppError {
    /// Process exit code for this failure.
    ///
    /// `2` when the input is missing, `3` when the output cannot be written,
    /// `1` otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ServiceError(ServiceError::NotFound(_)) => 2,
            Self::ServiceError(ServiceError::WriteError { .. }) => 3,
            _ => 1,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
