//! Group aggregation: fold ordered block records into commitment pairs.
//!
//! The block stream is partitioned into consecutive non-overlapping groups
//! of exactly 512 records in height order. Each full group yields one
//! [`GroupDigestPair`]; a trailing partial group is not an error, it simply
//! means "not enough blocks yet" and is discarded.

use crate::error::CoreError;
use crate::hash::{Keccak256, PureKeccak};
use crate::types::{BlockRecord, GroupDigestPair, GROUP_SIZE};

/// Computes the per-group digest pairs.
///
/// Generic over the hash backend so a faster Keccak implementation can be
/// slotted in; the pure software backend is the default.
#[derive(Debug, Clone, Default)]
pub struct GroupAggregator<B: Keccak256 = PureKeccak> {
    backend: B,
}

impl GroupAggregator<PureKeccak> {
    /// Aggregator over the built-in software backend.
    pub fn new() -> Self {
        Self {
            backend: PureKeccak,
        }
    }
}

impl<B: Keccak256> GroupAggregator<B> {
    /// Aggregator over a caller-supplied hash backend.
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Fold an ordered record stream into digest pairs, one per full group
    /// of 512. A trailing chunk shorter than 512 is silently discarded.
    pub fn aggregate(&self, records: &[BlockRecord]) -> Vec<GroupDigestPair> {
        records
            .chunks_exact(GROUP_SIZE)
            .map(|group| self.digest_group(group))
            .collect()
    }

    /// Compute the digest pair for one group the caller has committed to
    /// materializing. Unlike the trailing-chunk path in [`aggregate`],
    /// a record count other than exactly 512 here is an error.
    ///
    /// [`aggregate`]: Self::aggregate
    pub fn aggregate_group(&self, records: &[BlockRecord]) -> Result<GroupDigestPair, CoreError> {
        if records.len() != GROUP_SIZE {
            return Err(CoreError::DataIncomplete {
                expected: GROUP_SIZE,
                got: records.len(),
            });
        }
        Ok(self.digest_group(records))
    }

    fn digest_group(&self, group: &[BlockRecord]) -> GroupDigestPair {
        debug_assert_eq!(group.len(), GROUP_SIZE);

        let mut hashes = Vec::with_capacity(GROUP_SIZE * 32);
        let mut weights = Vec::with_capacity(GROUP_SIZE * 8);
        for record in group {
            hashes.extend_from_slice(record.hash.as_bytes());
            weights.extend_from_slice(&record.weight.to_le_bytes());
        }

        GroupDigestPair {
            hash_of_hashes: self.backend.digest(&hashes),
            hash_of_weights: self.backend.digest(&weights),
        }
    }
}
