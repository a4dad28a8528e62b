//! Error types for the checkpoint engine.
//!
//! Every failure here is recoverable at cycle granularity: it degrades to
//! "retry at the next tick" or "reject this input", never to corruption of
//! the previously published file. The engine has no fatal,
//! process-ending error modes.

use thiserror::Error;

use checkpoints_core::{CodecError, CoreError};

/// Errors from the external block source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("block source unavailable: {0}")]
    Unavailable(String),

    #[error("incomplete range [{start}, {start}+{count}): got {got} records")]
    IncompleteRange { start: u64, count: u64, got: u64 },

    #[error("non-contiguous heights in fetched range: expected {expected}, got {got}")]
    HeightGap { expected: u64, got: u64 },
}

/// Errors that abort a generation cycle or block acceptance of a download.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("integrity mismatch: computed {computed}, published {published}")]
    IntegrityMismatch { computed: String, published: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
