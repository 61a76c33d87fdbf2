//! Error types for the loggator library

use thiserror::Error;

/// Errors that can stop a pipeline run
#[derive(Error, Debug)]
pub enum Error {
    /// The source could not be opened, decompressed or executed
    #[error("failed to read logs from {source_desc}: {reason}")]
    SourceUnavailable { source_desc: String, reason: String },

    /// The source was readable but produced no text at all
    #[error("no log data received from {source_desc}")]
    NoData { source_desc: String },

    /// A worker thread panicked while aggregating its chunk
    #[error("worker {worker} panicked while aggregating its chunk")]
    WorkerPanicked { worker: usize },

    /// Log command arguments could not be split into words
    #[error("invalid log command: {0}")]
    InvalidCommand(String),
}

impl Error {
    pub(crate) fn unavailable(source_desc: impl Into<String>, reason: impl ToString) -> Self {
        Error::SourceUnavailable {
            source_desc: source_desc.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for loggator operations
pub type Result<T> = std::result::Result<T, Error>;
