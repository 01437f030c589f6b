//! Error types for the bin store.
//!
//! Every failure a store operation can hit is represented here, so callers
//! (the HTTP layer in particular) can map them to responses without panicking.

use std::io;

use thiserror::Error;

/// The main error type for bin store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Creation was requested with an empty name and no unique suffix.
    #[error("Name Unspecified")]
    NameUnspecified,

    /// A bin with the resolved identifier already exists.
    #[error("Bin Already Exists")]
    BinAlreadyExists(String),

    /// No bin exists under the requested name.
    #[error("Bin Not Found")]
    BinNotFound(String),

    /// The name contains characters that are unsafe in a file path.
    #[error("Invalid Bin Name")]
    InvalidName(String),

    /// Any other filesystem failure (permissions, disk full, bad encoding).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// The bin name the error refers to, when there is one.
    pub fn bin_name(&self) -> Option<&str> {
        match self {
            StoreError::BinAlreadyExists(name)
            | StoreError::BinNotFound(name)
            | StoreError::InvalidName(name) => Some(name),
            StoreError::NameUnspecified | StoreError::Io(_) => None,
        }
    }
}

/// A specialized Result type for bin store operations.
pub type StoreResult<T> = Result<T, StoreError>;
