//! Error types for gridweld

use thiserror::Error;

/// Main error type for gridweld operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("Malformed document: {0}")]
    Format(String),

    #[error("Conversion failed: {0}")]
    Conversion(String),

}

/// Result type alias for gridweld operations
pub type Result<T> = std::result::Result<T, Error>;
