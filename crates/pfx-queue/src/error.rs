//! Error types for the sequencer.

use pfx_ops::OpsError;
use thiserror::Error;

/// Error type for queued transforms.
#[derive(Error, Debug)]
pub enum QueueError {
    /// Decoding the source or encoding the result failed.
    #[error("codec error: {0}")]
    Codec(String),

    /// The target's worker stopped before replying.
    #[error("target worker closed")]
    Closed,

    /// No source registered under the key.
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// The blocking pixel pass panicked or was cancelled.
    #[error("pixel pass failed: {0}")]
    Join(String),

    /// The target's source was replaced while the job ran; its result was
    /// discarded.
    #[error("source replaced while the job ran")]
    Superseded,

    /// Submission happened outside a tokio runtime.
    #[error("no tokio runtime: {0}")]
    NoRuntime(String),

    /// Operation error.
    #[error(transparent)]
    Ops(#[from] OpsError),
}

impl QueueError {
    /// Wraps any displayable codec failure.
    pub fn codec(err: impl std::fmt::Display) -> Self {
        Self::Codec(err.to_string())
    }
}

/// Result type for queued transforms.
pub type QueueResult<T> = Result<T, QueueError>;
