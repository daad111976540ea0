use serde::Serialize;
use std::path::PathBuf;

/// Folder screenshots are written to unless told otherwise
pub const DEFAULT_OUTPUT_DIR: &str = "screenshots";

/// A frame that was captured and written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screenshot {
    pub filename: String,
    pub seconds: u64,
}

/// Where and how captured frames are persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureConfig {
    pub output_dir: PathBuf,
    /// Downscale frames wider than this, keeping the aspect ratio
    pub max_width: Option<u32>,
    /// Downscale frames taller than this, keeping the aspect ratio
    pub max_height: Option<u32>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_width: None,
            max_height: None,
        }
    }
}

impl CaptureConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}

/// Outcome of a batch capture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaptureReport {
    pub requested: usize,
    pub captured: usize,
    /// Offsets (in seconds) where no frame could be decoded
    pub failed: Vec<u64>,
    /// Set when an unexpected error ended the batch early
    pub aborted: Option<String>,
}

impl CaptureReport {
    pub fn summary(&self) -> String {
        if self.captured == 0 {
            "no screenshots obtained".to_string()
        } else {
            format!("{} screenshots obtained", self.captured)
        }
    }
}
