//! # Checkpoints Engine
//!
//! Drives the checkpoint-commitment pipeline end to end: fetch block
//! records from an external source, aggregate them into group commitments,
//! encode `checkpoints.dat`, verify it, and atomically replace the
//! previous file. Also validates downloaded checkpoint files before they
//! are accepted.
//!
//! The pipeline itself is single-threaded, synchronous, and deterministic;
//! the only suspension point is the [`BlockSource`] fetch. Watch mode is a
//! plain tick scheduler, not a work queue.

pub mod accept;
pub mod config;
pub mod cycle;
pub mod error;
pub mod source;
pub mod watch;

pub use accept::{accept_download, MismatchPolicy};
pub use config::{EngineConfig, WatchConfig};
pub use cycle::{CycleOutcome, CyclePhase, Generator, SIDECAR_FILE_NAME, VERSION_FILE_NAME};
pub use error::{EngineError, Result, SourceError};
pub use source::{check_range, BlockSource};
pub use watch::Watcher;
