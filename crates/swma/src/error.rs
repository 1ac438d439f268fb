//! Application-wide error types using thiserror.

use std::path::PathBuf;
use swma_common::SwmaError;

/// Errors surfaced by the command line shell.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Anything raised by the fetch, normalize and render pipeline.
    #[error(transparent)]
    Pipeline(#[from] SwmaError),

    /// The output directory could not be prepared.
    #[error("Cannot use output directory {}: {source}", path.display())]
    OutputDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the command line shell.
pub type CliResult<T> = Result<T, CliError>;
