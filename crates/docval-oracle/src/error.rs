//! Error types for the oracle layer.

use thiserror::Error;

/// Errors that can occur while asking an oracle for a completion.
#[derive(Error, Debug)]
pub enum OracleError {
    /// The oracle process could not be started.
    #[error("failed to start oracle process `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The oracle process exited unsuccessfully.
    #[error("oracle process exited with {status}: {stderr}")]
    ExitStatus { status: String, stderr: String },

    /// The oracle did not answer before the deadline.
    #[error("oracle did not answer within {0:?}")]
    Timeout(std::time::Duration),

    /// The HTTP request to the oracle failed.
    #[error("oracle request failed: {0}")]
    Request(String),

    /// The oracle answered with something that is not a completion.
    #[error("invalid oracle response: {0}")]
    InvalidResponse(String),

    /// The oracle is not usable in the current configuration.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// I/O error while talking to the oracle.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
