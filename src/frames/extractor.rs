use super::source::VideoSource;
use super::timestamp::timestamp_to_seconds;
use super::types::{CaptureConfig, CaptureReport, Screenshot};
use super::utils::{encode_jpeg, fit_within, screenshot_filename};
use crate::errors::{MemeshotError, MemeshotResult};
use crate::video::Mp4VideoSource;
use log::{error, info, warn};
use std::path::Path;

/// Grabs frames from a video and writes them out as JPEG screenshots.
///
/// The video handle lives as long as the extractor and is released when it
/// is dropped.
pub struct FrameExtractor<S: VideoSource = Mp4VideoSource> {
    source: S,
    config: CaptureConfig,
    screenshots: Vec<Screenshot>,
}

impl FrameExtractor<Mp4VideoSource> {
    /// Open a video file for capturing.
    ///
    /// Only existence is checked here; whether the file actually decodes is
    /// found out when the first frame is requested.
    pub fn open<P: AsRef<Path>>(video: P, config: CaptureConfig) -> MemeshotResult<Self> {
        let video = video.as_ref();
        if !video.exists() {
            return Err(MemeshotError::VideoNotFound(video.to_path_buf()));
        }
        let source = Mp4VideoSource::open(video)?;
        info!("Opened video {}", video.display());
        Ok(Self::with_source(source, config))
    }
}

impl<S: VideoSource> FrameExtractor<S> {
    pub fn with_source(source: S, config: CaptureConfig) -> Self {
        Self {
            source,
            config,
            screenshots: Vec::new(),
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Every screenshot written so far, oldest first
    pub fn screenshots(&self) -> &[Screenshot] {
        &self.screenshots
    }

    /// Grab the frame `seconds` into the video.
    ///
    /// Returns `Ok(false)` when no frame could be decoded there. Failing to
    /// write the image is an error.
    pub fn capture_at(&mut self, seconds: u64) -> MemeshotResult<bool> {
        self.source.seek(seconds.saturating_mul(1000));
        let frame = match self.source.read_frame()? {
            Some(frame) => frame,
            None => {
                warn!("No frame could be read at {}s", seconds);
                return Ok(false);
            }
        };

        let frame = fit_within(frame, self.config.max_width, self.config.max_height);
        let filename = screenshot_filename(seconds);
        let jpeg = encode_jpeg(&frame)?;
        std::fs::write(self.config.output_dir.join(&filename), jpeg)?;

        info!(
            "Added {} to {}",
            filename,
            self.config.output_dir.display()
        );
        self.screenshots.push(Screenshot { filename, seconds });
        Ok(true)
    }

    /// Grab one frame per `HH:MM:SS` timestamp, in order.
    ///
    /// All timestamps are validated before anything is captured. Frames that
    /// cannot be decoded are skipped; any other error stops the batch and is
    /// recorded in the report instead of being returned.
    pub fn capture_all<T: AsRef<str>>(&mut self, timestamps: &[T]) -> MemeshotResult<CaptureReport> {
        let offsets = timestamps
            .iter()
            .map(|ts| timestamp_to_seconds(ts.as_ref()))
            .collect::<MemeshotResult<Vec<_>>>()?;

        let mut report = CaptureReport {
            requested: offsets.len(),
            ..CaptureReport::default()
        };

        for seconds in offsets {
            match self.capture_at(seconds) {
                Ok(true) => report.captured += 1,
                Ok(false) => report.failed.push(seconds),
                Err(e) => {
                    error!("Capture stopped at {}s: {}", seconds, e);
                    report.aborted = Some(e.to_string());
                    break;
                }
            }
        }

        info!(
            "Captured {} of {} requested screenshots",
            report.captured, report.requested
        );
        Ok(report)
    }
}
