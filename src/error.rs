//! Error handling for the data decay library.
//!
//! Library code returns [`Result<T>`], whose error is [`DecayError`]. The
//! variants separate problems with the caller's input (malformed tables,
//! unsupported files) from failures inside polars, configuration parsing
//! and the filesystem.
//!
//! An empty dataset is not an error: profiling it yields a degenerate zero
//! report instead.
//!
//! ```
//! use data_decay::error::DecayError;
//!
//! fn describe(err: &DecayError) -> &'static str {
//!     match err {
//!         DecayError::InvalidInput(_) => "fix the table and retry",
//!         DecayError::UnsupportedFormat(_) => "convert the file to CSV",
//!         _ => "internal failure",
//!     }
//! }
//! ```
//!
//! The [`ResultExt`] trait adds `.context()` to any result whose error
//! converts into [`DecayError`]:
//!
//! ```no_run
//! use data_decay::error::ResultExt as _;
//!
//! fn read(path: &str) -> data_decay::error::Result<String> {
//!     std::fs::read_to_string(path).context("Failed to read dataset")
//! }
//! ```

use thiserror::Error;

/// Main error type for data decay operations.
#[derive(Debug, Error)]
pub enum DecayError {
    /// Malformed or non-tabular input (ragged rows, mismatched columns).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File format the loader does not understand.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Polars failures while reading, profiling or cleaning.
    #[error("Data processing error: {0}")]
    DataProcessing(String),

    /// Options file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl From<polars::error::PolarsError> for DecayError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<serde_json::Error> for DecayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

/// Result type alias for data decay operations.
pub type Result<T> = std::result::Result<T, DecayError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Errors
    ///
    /// Returns the original error, prefixed with `msg`.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    ///
    /// # Errors
    ///
    /// Returns the original error, prefixed with the closure's message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DecayError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(msg.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(f(), e.into()))
    }
}

// Every variant survives; only the message gains the prefix.
fn wrap(msg: String, err: DecayError) -> DecayError {
    match err {
        DecayError::InvalidInput(inner) => DecayError::InvalidInput(format!("{msg}: {inner}")),
        DecayError::UnsupportedFormat(inner) => {
            DecayError::UnsupportedFormat(format!("{msg}: {inner}"))
        }
        DecayError::DataProcessing(inner) => {
            DecayError::DataProcessing(format!("{msg}: {inner}"))
        }
        DecayError::Config(inner) => DecayError::Config(format!("{msg}: {inner}")),
        DecayError::Io(inner) => {
            DecayError::Io(std::io::Error::new(inner.kind(), format!("{msg}: {inner}")))
        }
        DecayError::Other(inner) => DecayError::Other(format!("{msg}: {inner}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecayError::InvalidInput("row 3 has 2 cells, expected 4".to_owned());
        assert_eq!(
            err.to_string(),
            "Invalid input: row 3 has 2 cells, expected 4"
        );
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file.csv",
        ));

        let result: Result<()> = result.context("Failed to read file");
        let err = result.expect_err("context keeps the error");
        assert!(err.to_string().contains("Failed to read file"));
        assert!(err.to_string().contains("file.csv"));
    }

    #[test]
    fn test_context_preserves_invalid_input() {
        let result: Result<()> = Err(DecayError::InvalidInput("ragged rows".to_owned()));
        let err = result.context("Profiling failed").expect_err("still an error");
        assert!(matches!(err, DecayError::InvalidInput(ref m) if m.contains("ragged rows")));
    }

    #[test]
    fn test_context_preserves_io_kind() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "opts.json",
        ));
        let err = result.context("Failed to read config file").expect_err("still an error");
        match err {
            DecayError::Io(inner) => {
                assert_eq!(inner.kind(), std::io::ErrorKind::NotFound);
                assert!(inner.to_string().starts_with("Failed to read config file"));
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_context_preserves_data_processing() {
        let result: std::result::Result<(), polars::error::PolarsError> =
            Err(polars::error::PolarsError::ComputeError("bad cast".into()));
        let err = result.context("Text analysis failed").expect_err("still an error");
        assert!(
            matches!(err, DecayError::DataProcessing(ref m) if m.starts_with("Text analysis failed")),
            "{err:?}"
        );
    }

    #[test]
    fn test_polars_error_conversion() {
        let err: DecayError =
            polars::error::PolarsError::ComputeError("bad cast".into()).into();
        assert!(matches!(err, DecayError::DataProcessing(_)));
    }
}
