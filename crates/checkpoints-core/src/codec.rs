//! Binary codec for `checkpoints.dat`.
//!
//! The wire format is bit-exact and little-endian throughout:
//!
//! ```text
//! [4 bytes]  group_count (u32 LE)
//! per group:
//!   [32 bytes] hash_of_hashes
//!   [32 bytes] hash_of_weights
//! ```
//!
//! No padding anywhere; total length is always `4 + 64 * group_count`.

use crate::error::CodecError;
use crate::hash::Digest;
use crate::types::{CheckpointFile, GroupDigestPair};

/// Bytes per encoded group record.
const GROUP_RECORD_SIZE: usize = 64;

/// Serialize a checkpoint file to its canonical byte layout.
pub fn encode(file: &CheckpointFile) -> Result<Vec<u8>, CodecError> {
    let count =
        u32::try_from(file.pairs.len()).map_err(|_| CodecError::TooManyGroups(file.pairs.len()))?;

    let mut buf = Vec::with_capacity(4 + file.pairs.len() * GROUP_RECORD_SIZE);
    buf.extend_from_slice(&count.to_le_bytes());
    for pair in &file.pairs {
        buf.extend_from_slice(pair.hash_of_hashes.as_bytes());
        buf.extend_from_slice(pair.hash_of_weights.as_bytes());
    }
    Ok(buf)
}

/// Deserialize a checkpoint file, rejecting anything whose length does not
/// match the declared group count exactly. There is no partial recovery: a
/// malformed file is refused outright.
pub fn decode(bytes: &[u8]) -> Result<CheckpointFile, CodecError> {
    if bytes.len() < 4 {
        return Err(CodecError::MalformedFile {
            expected: 4,
            got: bytes.len(),
        });
    }

    let mut header = [0u8; 4];
    header.copy_from_slice(&bytes[..4]);
    let count = u32::from_le_bytes(header) as usize;

    let expected = 4 + count * GROUP_RECORD_SIZE;
    if bytes.len() != expected {
        return Err(CodecError::MalformedFile {
            expected,
            got: bytes.len(),
        });
    }

    let pairs = bytes[4..]
        .chunks_exact(GROUP_RECORD_SIZE)
        .map(|record| {
            let mut hh = [0u8; 32];
            let mut hw = [0u8; 32];
            hh.copy_from_slice(&record[..32]);
            hw.copy_from_slice(&record[32..]);
            GroupDigestPair {
                hash_of_hashes: Digest::from_bytes(hh),
                hash_of_weights: Digest::from_bytes(hw),
            }
        })
        .collect();

    Ok(CheckpointFile { pairs })
}
