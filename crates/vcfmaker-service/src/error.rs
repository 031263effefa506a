use std::io;

use thiserror::Error;
use vcfmaker_core::error::CoreError;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The input could not be opened, parsed, or decoded.
    #[error("Read error: {context}: {source}")]
    ReadError {
        context: String,
        #[source]
        source: csv::Error,
    },

    /// The output could not be created or written.
    #[error("Write error: {context}: {source}")]
    WriteError {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Terminal I/O while prompting or printing a preview.
    #[error("Console error: {0}")]
    ConsoleError(#[from] io::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ServiceError {
    #[must_use]
    pub fn read(context: impl Into<String>, source: impl Into<csv::Error>) -> Self {
        Self::ReadError {
            context: context.into(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn write(context: impl Into<String>, source: io::Error) -> Self {
        Self::WriteError {
            context: context.into(),
            source,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
