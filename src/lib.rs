pub mod bits;

pub mod mp4;
pub use mp4::AvccConfig;

pub mod avc;
pub use avc::NaluType;

pub mod subtitles;
pub use subtitles::{title_case, Cue, SubtitleIndex};

pub mod frames;
pub use frames::{
    timestamp_to_seconds, CaptureConfig, CaptureReport, FrameExtractor, Screenshot, VideoSource,
};

pub mod video;
pub use video::Mp4VideoSource;

pub mod errors;
pub use errors::{FormatError, MemeshotError, MemeshotResult, Mp4Error};

