//! Site registry error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors fetching the raw sites table
#[derive(Error, Debug)]
pub enum SourceError {
    /// Network-level failure (connect, DNS, TLS)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    /// Portal answered with a non-success status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Body was not a JSON array of objects
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Failed to read site snapshot {path:?}: {error}")]
    Io { path: PathBuf, error: String },
}

/// Errors normalizing site records
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Site record {index} is missing field '{field}'")]
    MissingField { index: usize, field: &'static str },
}
