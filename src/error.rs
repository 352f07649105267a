//! Error types for the rnafeat library.

use thiserror::Error;

/// Errors that can occur during transcript selection and feature extraction.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// A validation constraint was violated.
    #[error("{0}")]
    Validation(String),

    /// A file format error was detected.
    #[error("{0}")]
    Format(String),

    /// An external feature tool failed or produced output that could not be used.
    /// Fatal for the whole batch handed to the tool.
    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },
}

impl Error {
    pub(crate) fn external(tool: &str, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}
