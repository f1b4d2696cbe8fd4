//! Typed domain errors.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator. Fatal kinds carry a distinct
//! sysexits-style exit code; everything else exits 1.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a verb before any command runs.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("\"{}\" does not exist.", .0.display())]
    MissingSource(PathBuf),

    #[error("cannot parse timestamp \"{0}\": expected 24-hour HH:MM")]
    MalformedTimestamp(String),

    #[error("cannot determine home directory")]
    EnvironmentUnavailable,
}

impl ServiceError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedTimestamp(_) => 65, // EX_DATAERR
            Self::MissingSource(_) => 66,      // EX_NOINPUT
            Self::EnvironmentUnavailable => 69, // EX_UNAVAILABLE
        }
    }
}
