//! Reading store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading the sensor readings file
#[derive(Error, Debug)]
pub enum ReadingsError {
    #[error("Failed to open readings file {path:?}: {error}")]
    Open { path: PathBuf, error: String },

    /// CSV syntax error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("Line {line}: could not parse timestamp '{value}'")]
    Timestamp { line: u64, value: String },

    #[error("Line {line}: could not parse value '{value}'")]
    Value { line: u64, value: String },

    #[error("Line {line}: missing field '{field}'")]
    MissingField { line: u64, field: &'static str },
}

/// Result type alias for reading store operations
pub type ReadingsResult<T> = Result<T, ReadingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReadingsError::Timestamp {
            line: 7,
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Line 7: could not parse timestamp 'yesterday'"
        );

        let err = ReadingsError::MissingColumn("VariableName");
        assert_eq!(err.to_string(), "Missing column 'VariableName'");
    }
}
