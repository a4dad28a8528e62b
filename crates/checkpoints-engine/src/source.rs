//! The block source seam.
//!
//! Fetching is the only suspension point in the pipeline; everything
//! downstream is synchronous CPU-bound transformation. Sources must be
//! idempotent so an aborted cycle can simply retry the same ranges later.

use async_trait::async_trait;

use checkpoints_core::BlockRecord;

use crate::error::SourceError;

/// An external supplier of block hashes and weights.
///
/// For a range `[start, start + count)` the source returns exactly `count`
/// records with gapless ascending heights. Any transport failure aborts
/// the current cycle; prior output is preserved.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Current chain height (number of blocks, so valid heights are
    /// `[0, height)`).
    async fn height(&self) -> Result<u64, SourceError>;

    /// Fetch `count` consecutive records starting at `start`.
    async fn fetch_range(&self, start: u64, count: u64) -> Result<Vec<BlockRecord>, SourceError>;
}

#[async_trait]
impl<T: BlockSource + ?Sized> BlockSource for std::sync::Arc<T> {
    async fn height(&self) -> Result<u64, SourceError> {
        (**self).height().await
    }

    async fn fetch_range(&self, start: u64, count: u64) -> Result<Vec<BlockRecord>, SourceError> {
        (**self).fetch_range(start, count).await
    }
}

/// Check the source contract on a fetched range: exact count, gapless
/// ascending heights from `start`.
pub fn check_range(
    records: &[BlockRecord],
    start: u64,
    count: u64,
) -> Result<(), SourceError> {
    if records.len() as u64 != count {
        return Err(SourceError::IncompleteRange {
            start,
            count,
            got: records.len() as u64,
        });
    }
    for (i, record) in records.iter().enumerate() {
        let expected = start + i as u64;
        if record.height != expected {
            return Err(SourceError::HeightGap {
                expected,
                got: record.height,
            });
        }
    }
    Ok(())
}
