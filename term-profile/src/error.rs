//! Error types for the term-profile crate.
//!
//! All fallible operations return [`ProfileError`] through the crate-wide
//! [`Result`] alias. Values that fail to parse as numbers are *not* errors:
//! they are classified or dropped by the profiler.

use thiserror::Error;

/// The main error type for term-profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The requested column does not exist in the loaded table.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Error from data source operations (missing file, unreadable table).
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "CSV")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Invalid profiler or source configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ProfileError>`.
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Returns true for failures caused by the input data or its location
    /// rather than by the profiler configuration.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::ColumnNotFound { .. }
                | Self::DataSource { .. }
                | Self::DataFusion(_)
                | Self::Arrow(_)
        )
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for ProfileError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Internal(format!("failed to write report: {err}"))
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ProfileError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            ProfileError::DataSource {
                source_type,
                message,
                source,
            } => ProfileError::DataSource {
                source_type,
                message: format!("{}: {message}", f()),
                source,
            },
            ProfileError::Internal(inner) => ProfileError::Internal(format!("{}: {inner}", f())),
            other => ProfileError::Internal(format!("{}: {other}", f())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_column_not_found() {
        let err = ProfileError::column_not_found("Gender");
        assert_eq!(err.to_string(), "Column 'Gender' not found in dataset");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_data_source_error() {
        let err = ProfileError::data_source("CSV", "Invalid file format");
        assert_eq!(err.to_string(), "Data source error: Invalid file format");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_data_source_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err = ProfileError::data_source_with_source("CSV", "could not open", Box::new(io));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_configuration_is_not_input_error() {
        let err = ProfileError::configuration("range_size must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: range_size must be positive"
        );
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_error_context() {
        fn failing_operation() -> Result<()> {
            Err(ProfileError::Internal("Something went wrong".to_string()))
        }

        let err = failing_operation().context("While formatting").unwrap_err();
        assert!(err.to_string().contains("While formatting"));
        assert!(err.to_string().contains("Something went wrong"));
    }

    #[test]
    fn test_context_keeps_data_source_variant() {
        let result: Result<()> = Err(ProfileError::data_source("CSV", "unreadable"));
        let err = result.context("Loading data.csv").unwrap_err();
        assert!(matches!(err, ProfileError::DataSource { .. }));
        assert!(err.to_string().contains("Loading data.csv: unreadable"));
    }
}
