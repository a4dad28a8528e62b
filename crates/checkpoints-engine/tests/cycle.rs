//! Integration tests for the generation cycle against an in-memory
//! block source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use checkpoints_core::{
    cn_fast_hash, codec, parse_sidecar_line, sha256_hex, BlockRecord, GroupAggregator,
    IntegrityRecord, GROUP_SIZE,
};
use checkpoints_engine::{
    BlockSource, CycleOutcome, EngineConfig, EngineError, Generator, SourceError, WatchConfig,
    Watcher, SIDECAR_FILE_NAME, VERSION_FILE_NAME,
};

/// In-memory chain that can grow and have fetch failures injected.
struct MemorySource {
    records: Mutex<Vec<BlockRecord>>,
    failing: AtomicBool,
}

impl MemorySource {
    fn with_blocks(n: usize) -> Arc<Self> {
        let source = Arc::new(Self {
            records: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        });
        source.grow_to(n);
        source
    }

    fn grow_to(&self, n: usize) {
        let mut records = self.records.lock().unwrap();
        while records.len() < n {
            let height = records.len() as u64;
            records.push(BlockRecord {
                height,
                hash: cn_fast_hash(&height.to_le_bytes()),
                weight: 600 + (height * 13) % 2000,
            });
        }
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlockSource for MemorySource {
    async fn height(&self) -> Result<u64, SourceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("injected failure".into()));
        }
        Ok(self.records.lock().unwrap().len() as u64)
    }

    async fn fetch_range(&self, start: u64, count: u64) -> Result<Vec<BlockRecord>, SourceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("injected failure".into()));
        }
        let records = self.records.lock().unwrap();
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

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn config(dir: &tempfile::TempDir) -> EngineConfig {
    EngineConfig {
        output_dir: dir.path().to_path_buf(),
        url: "https://example.org/checkpoints/checkpoints.dat".to_string(),
    }
}

#[tokio::test]
async fn full_cycle_publishes_file_and_sidecars() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::with_blocks(GROUP_SIZE * 3);
    let mut generator = Generator::new(Arc::clone(&source), config(&dir));

    let (groups, blocks_covered, sha256) = match generator.run_cycle().await.unwrap() {
        CycleOutcome::Published {
            groups,
            blocks_covered,
            sha256,
        } => (groups, blocks_covered, sha256),
        other => panic!("expected Published, got {other:?}"),
    };
    assert_eq!(groups, 3);
    assert_eq!(blocks_covered, 1536);
    assert_eq!(generator.last_published_groups(), Some(3));

    // The canonical file: 3 groups, 196 bytes, digest matches the outcome.
    let bytes = std::fs::read(generator.output_path()).unwrap();
    assert_eq!(bytes.len(), 196);
    assert_eq!(sha256_hex(&bytes), sha256);

    // Sidecar line carries the same digest.
    let line = std::fs::read_to_string(dir.path().join(SIDECAR_FILE_NAME)).unwrap();
    assert_eq!(parse_sidecar_line(&line).unwrap(), sha256);

    // Version JSON round-trips and is internally consistent.
    let json = std::fs::read(dir.path().join(VERSION_FILE_NAME)).unwrap();
    let record: IntegrityRecord = serde_json::from_slice(&json).unwrap();
    assert_eq!(record.groups, 3);
    assert_eq!(record.blocks_covered, 1536);
    assert_eq!(record.sha256, sha256);
    assert!(record.updated.contains('T'));
}

#[tokio::test]
async fn published_file_matches_direct_aggregation() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::with_blocks(GROUP_SIZE * 2 + 300);
    let mut generator = Generator::new(Arc::clone(&source), config(&dir));
    generator.run_cycle().await.unwrap();

    let bytes = std::fs::read(generator.output_path()).unwrap();
    let decoded = codec::decode(&bytes).unwrap();

    let records = source.records.lock().unwrap().clone();
    let expected = GroupAggregator::new().aggregate(&records);
    // The trailing 300 blocks are below a group boundary and not covered.
    assert_eq!(decoded.pairs, expected);
    assert_eq!(decoded.group_count(), 2);
}

#[tokio::test]
async fn unchanged_height_is_no_new_groups() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::with_blocks(GROUP_SIZE);
    let mut generator = Generator::new(Arc::clone(&source), config(&dir));

    assert!(matches!(
        generator.run_cycle().await.unwrap(),
        CycleOutcome::Published { groups: 1, .. }
    ));
    assert_eq!(
        generator.run_cycle().await.unwrap(),
        CycleOutcome::NoNewGroups
    );

    // Growth within the same group boundary still publishes nothing new.
    source.grow_to(GROUP_SIZE + 511);
    assert_eq!(
        generator.run_cycle().await.unwrap(),
        CycleOutcome::NoNewGroups
    );

    // Crossing the boundary does.
    source.grow_to(GROUP_SIZE * 2);
    assert!(matches!(
        generator.run_cycle().await.unwrap(),
        CycleOutcome::Published { groups: 2, .. }
    ));
}

#[tokio::test]
async fn fetch_failure_preserves_previous_output() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::with_blocks(GROUP_SIZE);
    let mut generator = Generator::new(Arc::clone(&source), config(&dir));
    generator.run_cycle().await.unwrap();
    let before = std::fs::read(generator.output_path()).unwrap();

    source.grow_to(GROUP_SIZE * 5);
    source.set_failing(true);
    let err = generator.run_cycle().await.unwrap_err();
    assert!(matches!(err, EngineError::Source(SourceError::Unavailable(_))));

    // Previous file untouched, state not advanced.
    assert_eq!(std::fs::read(generator.output_path()).unwrap(), before);
    assert_eq!(generator.last_published_groups(), Some(1));

    // Next tick after recovery succeeds.
    source.set_failing(false);
    assert!(matches!(
        generator.run_cycle().await.unwrap(),
        CycleOutcome::Published { groups: 5, .. }
    ));
}

#[tokio::test]
async fn short_chain_publishes_empty_file_once() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::with_blocks(511);
    let mut generator = Generator::new(Arc::clone(&source), config(&dir));

    assert!(matches!(
        generator.run_cycle().await.unwrap(),
        CycleOutcome::Published {
            groups: 0,
            blocks_covered: 0,
            ..
        }
    ));
    let bytes = std::fs::read(generator.output_path()).unwrap();
    assert_eq!(bytes, vec![0, 0, 0, 0]);

    assert_eq!(
        generator.run_cycle().await.unwrap(),
        CycleOutcome::NoNewGroups
    );
}

#[tokio::test(start_paused = true)]
async fn watcher_ticks_and_shuts_down_cleanly() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::with_blocks(GROUP_SIZE);
    let generator = Generator::new(Arc::clone(&source), config(&dir));
    let output_path = generator.output_path();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut watcher = Watcher::new(
        generator,
        WatchConfig {
            interval: Duration::from_secs(300),
        },
    );
    let handle = tokio::spawn(async move {
        watcher.run(shutdown_rx).await;
        watcher
    });

    // First tick fires immediately; paused time auto-advances.
    tokio::time::sleep(Duration::from_secs(1)).await;
    shutdown_tx.send(true).unwrap();
    let watcher = handle.await.unwrap();

    assert_eq!(watcher.generator().last_published_groups(), Some(1));
    assert!(output_path.exists());
}
