//! Common error types for album battle

use thiserror::Error;

/// Common result type for album battle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the loader, resolver and engine
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or row decoding error
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested album or display name not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unparseable event timestamp
    #[error("Invalid timestamp: {0}")]
    Timestamp(String),
}

impl Error {
    /// Wrap a csv error with the path of the file being read
    pub fn csv(path: impl Into<String>, source: csv::Error) -> Self {
        Error::Csv {
            path: path.into(),
            source,
        }
    }
}
