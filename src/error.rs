//! Error types for verificar.

use std::path::PathBuf;

use crate::validation::Check;

/// Result type alias for verificar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in verificar operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A data quality check did not hold.
    #[error("Validation failed [{check}]: {message}")]
    ValidationFailure {
        /// The check that failed.
        check: Check,
        /// Description of the violated condition.
        message: String,
    },

    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Arrow error during data processing.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error during file operations.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Column not found in schema.
    #[error("Column '{name}' not found in schema")]
    ColumnNotFound {
        /// The name of the missing column.
        name: String,
    },

    /// Unsupported file format.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The unsupported format name or extension.
        format: String,
    },

    /// Empty dataset error.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Schema mismatch between batches or fixture columns.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch {
        /// Description of the schema mismatch.
        message: String,
    },

    /// Output formatting error.
    #[error("Format error: {0}")]
    Format(String),
}

impl Error {
    /// Create a validation failure for a check.
    pub fn validation(check: Check, message: impl Into<String>) -> Self {
        Self::ValidationFailure {
            check,
            message: message.into(),
        }
    }

    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create a column not found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Returns true if this error is a failed check rather than a
    /// loading or processing problem.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::ValidationFailure { .. })
    }

    /// Returns the failed check, if this is a validation failure.
    pub fn check(&self) -> Option<Check> {
        match self {
            Self::ValidationFailure { check, .. } => Some(*check),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_message() {
        let err = Error::validation(Check::RowCount, "Expected 4 rows, got 3");
        let msg = err.to_string();
        assert!(msg.contains("row-count"));
        assert!(msg.contains("Expected 4 rows, got 3"));
        assert!(err.is_validation_failure());
        assert_eq!(err.check(), Some(Check::RowCount));
    }

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io(io_err, "/path/to/file");
        assert!(err.to_string().contains("/path/to/file"));
        assert!(err.to_string().contains("file not found"));
        assert!(!err.is_validation_failure());
        assert_eq!(err.check(), None);
    }

    #[test]
    fn test_column_not_found() {
        let err = Error::column_not_found("amount");
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = Error::unsupported_format("xlsx");
        assert!(err.to_string().contains("xlsx"));
    }

    #[test]
    fn test_schema_mismatch() {
        let err = Error::schema_mismatch("expected Float64, got Utf8");
        assert!(err.to_string().contains("expected Float64, got Utf8"));
    }

    #[test]
    fn test_empty_dataset() {
        let err = Error::EmptyDataset;
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_format_error() {
        let err = Error::Format("bad json".to_string());
        assert!(err.to_string().contains("bad json"));
    }
}
