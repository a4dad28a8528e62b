//! Engine configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a [`Generator`](crate::cycle::Generator).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory where `checkpoints.dat` and its sidecars are written.
    pub output_dir: PathBuf,
    /// Public download URL recorded verbatim in the version JSON.
    pub url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            url: String::new(),
        }
    }
}

/// Configuration for watch mode.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Fixed polling interval between ticks. Each tick runs at most one
    /// full cycle; failed ticks wait for the next scheduled tick.
    pub interval: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
        }
    }
}
