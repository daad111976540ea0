mod extractor;
mod source;
mod timestamp;
mod types;
mod utils;

pub use extractor::FrameExtractor;
pub use source::VideoSource;
pub use timestamp::{timestamp_to_seconds, CAPTURE_OFFSET_SECS};
pub use types::{CaptureConfig, CaptureReport, Screenshot, DEFAULT_OUTPUT_DIR};
pub use utils::{screenshot_filename, JPEG_QUALITY, SCREENSHOT_PREFIX};

#[cfg(test)]
pub use source::MockVideoSource;
