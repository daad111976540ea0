mod analyzer;
mod decoder;
mod source;
mod types;

pub use source::Mp4VideoSource;
pub use types::VideoTrack;
