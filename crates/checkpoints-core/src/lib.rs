//! # Checkpoints Core
//!
//! Pure primitives for the checkpoint-commitment engine: the from-scratch
//! Keccak-256 variant (`cn_fast_hash`), group aggregation over block
//! records, the binary `checkpoints.dat` codec, and transport-level
//! SHA-256 integrity.
//!
//! This crate contains no I/O, no async, no clock access. It is pure
//! computation over already-materialized data, and fully deterministic.
//!
//! ## Key Types
//!
//! - [`Digest`] - A 32-byte `cn_fast_hash` output
//! - [`BlockRecord`] - One block's height, hash, and weight
//! - [`GroupDigestPair`] - The commitment to one group of 512 blocks
//! - [`CheckpointFile`] - The ordered pair sequence behind `checkpoints.dat`
//!
//! ## Pipeline
//!
//! block records → [`GroupAggregator`] → [`codec::encode`] → bytes →
//! [`integrity::sha256_hex`] → distribution.

pub mod aggregate;
pub mod codec;
pub mod error;
pub mod hash;
pub mod integrity;
pub mod keccak;
pub mod types;

pub use aggregate::GroupAggregator;
pub use error::{CodecError, CoreError};
pub use hash::{cn_fast_hash, Digest, Keccak256, PureKeccak, KECCAK_RATE};
pub use integrity::{
    parse_sidecar_line, sha256_hex, sidecar_line, verify, SidecarError, Verification,
    CHECKPOINT_FILE_NAME,
};
pub use keccak::keccak_f1600;
pub use types::{BlockRecord, CheckpointFile, GroupDigestPair, IntegrityRecord, GROUP_SIZE};
