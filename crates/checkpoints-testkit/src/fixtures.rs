//! Deterministic fixtures: synthetic chains and an in-memory block source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use checkpoints_core::{BlockRecord, Digest};
use checkpoints_engine::{BlockSource, SourceError};

/// Build `n` pseudo-random block records with gapless heights from 0.
///
/// The same seed always yields the same chain, so digests over these
/// records are stable across test runs.
pub fn synthetic_chain(n: usize, seed: u64) -> Vec<BlockRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let mut hash = [0u8; 32];
            rng.fill(&mut hash);
            BlockRecord {
                height: i as u64,
                hash: Digest::from_bytes(hash),
                weight: rng.gen_range(300u64..100_000),
            }
        })
        .collect()
}

/// An in-memory [`BlockSource`] over a synthetic chain.
///
/// Supports growing the chain mid-test and injecting fetch failures to
/// exercise cycle-abort paths.
pub struct MemorySource {
    records: Mutex<Vec<BlockRecord>>,
    failing: AtomicBool,
    seed: u64,
}

impl MemorySource {
    /// Source over a fresh synthetic chain of `n` blocks.
    pub fn new(n: usize, seed: u64) -> Self {
        Self {
            records: Mutex::new(synthetic_chain(n, seed)),
            failing: AtomicBool::new(false),
            seed,
        }
    }

    /// Extend the chain to `n` blocks (no-op if already that long).
    /// Existing records are unchanged: the chain is regenerated from the
    /// same seed, so a longer run is a strict prefix-extension.
    pub fn grow_to(&self, n: usize) {
        let mut records = self.records.lock().expect("fixture lock poisoned");
        if n > records.len() {
            *records = synthetic_chain(n, self.seed);
        }
    }

    /// Make every subsequent call fail with `SourceError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the full chain.
    pub fn records(&self) -> Vec<BlockRecord> {
        self.records.lock().expect("fixture lock poisoned").clone()
    }
}

#[async_trait]
impl BlockSource for MemorySource {
    async fn height(&self) -> Result<u64, SourceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("fixture offline".into()));
        }
        Ok(self.records.lock().expect("fixture lock poisoned").len() as u64)
    }

    async fn fetch_range(&self, start: u64, count: u64) -> Result<Vec<BlockRecord>, SourceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("fixture offline".into()));
        }
        let records = self.records.lock().expect("fixture lock poisoned");
        let end = (start + count) as usize;
        if end > records.len() {
            return Err(SourceError::IncompleteRange {
                start,
                count,
                got: records.len().saturating_sub(start as usize) as u64,
            });
        }
        Ok(records[start as usize..end].to_vec())
    }
}
