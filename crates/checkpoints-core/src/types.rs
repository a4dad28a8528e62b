//! Data model for the checkpoint-commitment pipeline.

use serde::{Deserialize, Serialize};

use crate::hash::Digest;

/// Number of consecutive blocks folded into one commitment pair.
///
/// Must match the consuming daemon's `HASH_OF_HASHES_STEP`; changing it
/// invalidates every published checkpoint file.
pub const GROUP_SIZE: usize = 512;

/// One block as supplied by the external block source.
///
/// Heights within any fetch window form a gapless ascending sequence
/// starting at the window's base. Records are transient: they are owned by
/// a single generation cycle and dropped once the cycle completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRecord {
    /// Block height.
    pub height: u64,
    /// The block's 32-byte hash.
    pub hash: Digest,
    /// The block's weight in bytes.
    pub weight: u64,
}

/// The two digests committing to one full group of 512 blocks.
///
/// Computed once per group and immutable thereafter. Groups are
/// independent: a pair is unaffected by data in any other group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDigestPair {
    /// `cn_fast_hash` over the 512 concatenated block hashes.
    pub hash_of_hashes: Digest,
    /// `cn_fast_hash` over the 512 block weights as 8-byte little-endian.
    pub hash_of_weights: Digest,
}

/// The in-memory form of `checkpoints.dat`: an ordered sequence of group
/// digest pairs.
///
/// Created fresh each generation cycle and replaced atomically only after
/// a successful encode + verify; until then the previous file remains
/// authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckpointFile {
    /// Digest pairs in group order (group g covers heights
    /// `[g * 512, (g + 1) * 512)`).
    pub pairs: Vec<GroupDigestPair>,
}

impl CheckpointFile {
    /// Create from an ordered pair sequence.
    pub fn new(pairs: Vec<GroupDigestPair>) -> Self {
        Self { pairs }
    }

    /// Number of full groups committed to.
    pub fn group_count(&self) -> u32 {
        self.pairs.len() as u32
    }

    /// Number of blocks covered by the committed groups.
    pub fn blocks_covered(&self) -> u64 {
        self.pairs.len() as u64 * GROUP_SIZE as u64
    }

    /// Whether the file commits to no groups at all.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// The published metadata record (`checkpoints_version.json`), derived
/// from a completed checkpoint file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityRecord {
    /// Number of groups in the published file.
    pub groups: u32,
    /// Blocks covered, always `groups * 512`.
    pub blocks_covered: u64,
    /// SHA-256 of the encoded file, lowercase hex.
    pub sha256: String,
    /// Public download URL of the file.
    pub url: String,
    /// ISO-8601 UTC timestamp of publication.
    pub updated: String,
}

impl IntegrityRecord {
    /// Derive a record from a completed file.
    ///
    /// The timestamp is injected by the caller so this crate stays free of
    /// clock access.
    pub fn new(file: &CheckpointFile, sha256: String, url: String, updated: String) -> Self {
        Self {
            groups: file.group_count(),
            blocks_covered: file.blocks_covered(),
            sha256,
            url,
            updated,
        }
    }
}
