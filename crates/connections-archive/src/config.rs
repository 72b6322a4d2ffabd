//! Run configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Page listing every past Connections answer.
pub const ARCHIVE_URL: &str = "https://tryhardguides.com/nyt-connections-answers";

/// Output path used when none is given.
pub const DEFAULT_OUTPUT: &str = "data/connections.csv";

/// How long to let client-side scripts populate the page after load.
pub const DEFAULT_SETTLE_MS: u64 = 5_000;

/// Upper bound on the initial navigation.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Everything one run needs, passed explicitly to the pipeline.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub url: String,
    pub output: PathBuf,
    pub settle: Duration,
    pub timeout_ms: u64,
    /// Chromium binary to launch instead of searching `PATH`.
    pub chromium: Option<PathBuf>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            url: ARCHIVE_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            chromium: None,
        }
    }
}

impl ArchiveConfig {
    /// Default configuration writing to `output`.
    pub fn with_output(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }
}
