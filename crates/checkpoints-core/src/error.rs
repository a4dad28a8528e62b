//! Error types for the checkpoint-commitment core.

use thiserror::Error;

/// Errors from aggregation over committed groups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("incomplete group data: expected {expected} records, got {got}")]
    DataIncomplete { expected: usize, got: usize },
}

/// Errors from encoding or decoding `checkpoints.dat`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed checkpoint file: expected {expected} bytes, got {got}")]
    MalformedFile { expected: usize, got: usize },

    #[error("group count {0} does not fit the u32 header")]
    TooManyGroups(usize),
}
