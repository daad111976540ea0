use crate::errors::MemeshotResult;
use image::RgbImage;

/// Something that can be positioned in time and asked for the picture there.
///
/// `read_frame` returns `Ok(None)` when no picture is available at the current
/// position (past the end, undecodable, not a video). `Err` is reserved for
/// failures that should stop a whole batch.
#[cfg_attr(test, mockall::automock)]
pub trait VideoSource {
    fn seek(&mut self, millis: u64);
    fn read_frame(&mut self) -> MemeshotResult<Option<RgbImage>>;
}
