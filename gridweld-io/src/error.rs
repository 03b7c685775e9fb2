//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while reading or writing model documents
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("XML error: {message}")]
    Xml { message: String },

    #[error("Write error: {message}")]
    WriteError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    pub(crate) fn xml<E: std::fmt::Display>(err: E) -> Self {
        IoError::Xml {
            message: err.to_string(),
        }
    }

    pub(crate) fn write<E: std::fmt::Display>(err: E) -> Self {
        IoError::WriteError {
            message: err.to_string(),
        }
    }
}

impl From<IoError> for gridweld_core::Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Io(e) => gridweld_core::Error::Io(e),
            IoError::FileNotFound { path } => gridweld_core::Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            )),
            other => gridweld_core::Error::Format(other.to_string()),
        }
    }
}
