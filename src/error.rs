use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that abort a conversion run.
///
/// Anything that can be reported and skipped (bad dates, out-of-order
/// timestamps) is a [`Diagnostic`](crate::transform::Diagnostic) instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the user mapping file exists but cannot be parsed.
    #[error("error parsing config file at {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Raised when the source export cannot be read as CSV.
    #[error("error reading CSV {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Raised when the converted rows cannot be written.
    #[error("error writing CSV {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
