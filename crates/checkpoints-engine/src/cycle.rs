//! The generation cycle state machine.
//!
//! `IDLE → FETCHING → AGGREGATING → ENCODING → VERIFYING → IDLE`, with
//! publication proper (SFTP, HTTP hosting) left to external distribution.
//! A cycle that fails at any phase aborts whole: the previously published
//! `checkpoints.dat` remains authoritative, and the next scheduled tick
//! retries from scratch.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};

use checkpoints_core::{
    codec, sha256_hex, sidecar_line, verify, CheckpointFile, GroupAggregator, IntegrityRecord,
    Keccak256, PureKeccak, CHECKPOINT_FILE_NAME, GROUP_SIZE,
};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::source::{check_range, BlockSource};

/// Sidecar filename for the published SHA-256 line.
pub const SIDECAR_FILE_NAME: &str = "checkpoints.dat.sha256";

/// Sidecar filename for the published metadata JSON.
pub const VERSION_FILE_NAME: &str = "checkpoints_version.json";

/// Scratch name for the not-yet-verified file.
const TMP_FILE_NAME: &str = ".checkpoints.dat.tmp";

/// Where a generator currently is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Fetching,
    Aggregating,
    Encoding,
    Verifying,
}

/// Result of one completed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A fresh file was written and verified.
    Published {
        groups: u32,
        blocks_covered: u64,
        sha256: String,
    },
    /// The chain has not grown past the last published group boundary.
    NoNewGroups,
}

/// Drives generation cycles over a block source.
///
/// Cycles are strictly sequential; the only shared state is the last
/// published group count, written at the end of a successful cycle and
/// read at the start of the next.
pub struct Generator<S: BlockSource, B: Keccak256 = PureKeccak> {
    source: S,
    aggregator: GroupAggregator<B>,
    config: EngineConfig,
    phase: CyclePhase,
    last_published_groups: Option<u32>,
}

impl<S: BlockSource> Generator<S, PureKeccak> {
    /// Generator over the built-in software hash backend.
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self::with_aggregator(source, GroupAggregator::new(), config)
    }
}

impl<S: BlockSource, B: Keccak256> Generator<S, B> {
    /// Generator over a caller-supplied aggregator (alternate hash
    /// backend, resolved once here).
    pub fn with_aggregator(
        source: S,
        aggregator: GroupAggregator<B>,
        config: EngineConfig,
    ) -> Self {
        Self {
            source,
            aggregator,
            config,
            phase: CyclePhase::Idle,
            last_published_groups: None,
        }
    }

    /// Current cycle phase.
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Group count of the last successfully published file, if any cycle
    /// has completed.
    pub fn last_published_groups(&self) -> Option<u32> {
        self.last_published_groups
    }

    /// Path of the canonical output file.
    pub fn output_path(&self) -> PathBuf {
        self.config.output_dir.join(CHECKPOINT_FILE_NAME)
    }

    /// Run one full generation cycle.
    ///
    /// On error the previous output is untouched and the generator is back
    /// in `Idle`, ready for the next scheduled tick.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let outcome = self.cycle_inner().await;
        self.phase = CyclePhase::Idle;
        if let Err(ref e) = outcome {
            warn!(error = %e, "cycle aborted; previous checkpoint file remains authoritative");
        }
        outcome
    }

    async fn cycle_inner(&mut self) -> Result<CycleOutcome> {
        self.phase = CyclePhase::Fetching;
        let height = self.source.height().await?;
        let groups = height / GROUP_SIZE as u64;
        let groups = u32::try_from(groups)
            .map_err(|_| checkpoints_core::CodecError::TooManyGroups(groups as usize))?;

        if self.last_published_groups == Some(groups) {
            debug!(height, groups, "no new full groups since last publication");
            return Ok(CycleOutcome::NoNewGroups);
        }
        info!(height, groups, "starting generation cycle");

        let mut pairs = Vec::with_capacity(groups as usize);
        for g in 0..groups as u64 {
            let start = g * GROUP_SIZE as u64;
            let records = self.source.fetch_range(start, GROUP_SIZE as u64).await?;
            check_range(&records, start, GROUP_SIZE as u64)?;

            self.phase = CyclePhase::Aggregating;
            pairs.push(self.aggregator.aggregate_group(&records)?);
            self.phase = CyclePhase::Fetching;
        }

        self.phase = CyclePhase::Encoding;
        let file = CheckpointFile::new(pairs);
        let bytes = codec::encode(&file)?;
        let sha256 = sha256_hex(&bytes);

        self.phase = CyclePhase::Verifying;
        self.publish(&file, &bytes, &sha256)?;

        self.last_published_groups = Some(groups);
        info!(
            groups,
            blocks_covered = file.blocks_covered(),
            %sha256,
            "cycle complete"
        );
        Ok(CycleOutcome::Published {
            groups,
            blocks_covered: file.blocks_covered(),
            sha256,
        })
    }

    /// Write, read back, verify, then atomically replace the canonical
    /// file and refresh both sidecars.
    fn publish(&self, file: &CheckpointFile, bytes: &[u8], sha256: &str) -> Result<()> {
        publish_with_reader(&self.config, file, bytes, sha256, |path| fs::read(path))
    }
}

/// Publication proper, with the read-back step as a seam.
///
/// A self-generated integrity mismatch is fatal to the cycle: the temp
/// file is removed and nothing replaces the previous output.
fn publish_with_reader<R>(
    config: &EngineConfig,
    file: &CheckpointFile,
    bytes: &[u8],
    sha256: &str,
    read_back: R,
) -> Result<()>
where
    R: Fn(&Path) -> std::io::Result<Vec<u8>>,
{
    fs::create_dir_all(&config.output_dir)?;

    let final_path = config.output_dir.join(CHECKPOINT_FILE_NAME);
    let tmp_path = config.output_dir.join(TMP_FILE_NAME);

    fs::write(&tmp_path, bytes)?;
    let written = read_back(&tmp_path)?;
    let reread = sha256_hex(&written);
    if !verify(&reread, sha256).is_match() {
        let _ = fs::remove_file(&tmp_path);
        return Err(EngineError::IntegrityMismatch {
            computed: reread,
            published: sha256.to_string(),
        });
    }
    fs::rename(&tmp_path, &final_path)?;

    fs::write(
        config.output_dir.join(SIDECAR_FILE_NAME),
        sidecar_line(sha256),
    )?;

    let record = IntegrityRecord::new(
        file,
        sha256.to_string(),
        config.url.clone(),
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    let json = serde_json::to_vec_pretty(&record)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(config.output_dir.join(VERSION_FILE_NAME), json)?;

    Ok(())
}
