//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// The suite ran but not every scenario passed
    #[error("Suite failed: {failed} failed, {skipped} skipped")]
    SuiteFailed {
        /// Failed runs
        failed: usize,
        /// Skipped runs
        skipped: usize,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cartwright library error
    #[error("Cartwright error: {0}")]
    Cartwright(#[from] cartwright::CartwrightError),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
