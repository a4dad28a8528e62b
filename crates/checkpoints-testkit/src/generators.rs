//! Proptest generators for property-based testing.

use proptest::prelude::*;

use checkpoints_core::{BlockRecord, CheckpointFile, Digest, GroupDigestPair};

/// Generate a random Digest.
pub fn digest() -> impl Strategy<Value = Digest> {
    any::<[u8; 32]>().prop_map(Digest::from_bytes)
}

/// Generate a random GroupDigestPair.
pub fn digest_pair() -> impl Strategy<Value = GroupDigestPair> {
    (digest(), digest()).prop_map(|(hash_of_hashes, hash_of_weights)| GroupDigestPair {
        hash_of_hashes,
        hash_of_weights,
    })
}

/// Generate a CheckpointFile with 0..=max_groups pairs.
pub fn checkpoint_file(max_groups: usize) -> impl Strategy<Value = CheckpointFile> {
    prop::collection::vec(digest_pair(), 0..=max_groups).prop_map(CheckpointFile::new)
}

/// Generate a gapless ascending run of block records starting at `base`,
/// with 0..=max_len records.
pub fn record_run(base: u64, max_len: usize) -> impl Strategy<Value = Vec<BlockRecord>> {
    prop::collection::vec((digest(), any::<u64>()), 0..=max_len).prop_map(move |entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (hash, weight))| BlockRecord {
                height: base + i as u64,
                hash,
                weight,
            })
            .collect()
    })
}
