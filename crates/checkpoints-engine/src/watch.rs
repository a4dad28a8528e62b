//! Watch mode: a fixed-interval tick scheduler around the generator.
//!
//! Each tick runs at most one full cycle. A failed tick does not busy
//! retry; it waits for the next scheduled tick. Cancellation between
//! ticks is always clean, and cancelling mid-cycle only discards
//! in-progress work (the previous file is untouched until a cycle fully
//! succeeds).

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use checkpoints_core::{Keccak256, PureKeccak};

use crate::config::WatchConfig;
use crate::cycle::{CycleOutcome, Generator};
use crate::source::BlockSource;

/// Runs generation cycles forever on a fixed interval.
pub struct Watcher<S: BlockSource, B: Keccak256 = PureKeccak> {
    generator: Generator<S, B>,
    config: WatchConfig,
}

impl<S: BlockSource, B: Keccak256> Watcher<S, B> {
    pub fn new(generator: Generator<S, B>, config: WatchConfig) -> Self {
        Self { generator, config }
    }

    /// Poll until the shutdown signal flips to `true` (or its sender is
    /// dropped). The first tick fires immediately.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval = ?self.config.interval, "watch mode started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.generator.run_cycle().await {
                        Ok(CycleOutcome::Published { groups, sha256, .. }) => {
                            info!(groups, %sha256, "published new checkpoint file");
                        }
                        Ok(CycleOutcome::NoNewGroups) => {}
                        Err(e) => {
                            // run_cycle already logged the abort; note the
                            // backoff-to-next-tick here.
                            warn!(error = %e, "tick failed; retrying at next interval");
                        }
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("watch mode stopping");
                        return;
                    }
                }
            }
        }
    }

    /// Access the wrapped generator (e.g. to inspect last published state
    /// after shutdown).
    pub fn generator(&self) -> &Generator<S, B> {
        &self.generator
    }
}
