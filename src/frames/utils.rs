use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

/// JPEG quality used for every screenshot
pub const JPEG_QUALITY: u8 = 85;

/// Name prefix of every screenshot file
pub const SCREENSHOT_PREFIX: &str = "memeshot_";

/// `memeshot_{seconds}secs.jpg`
pub fn screenshot_filename(seconds: u64) -> String {
    format!("{}{}secs.jpg", SCREENSHOT_PREFIX, seconds)
}

/// Shrink an image to fit the given bounds, keeping its aspect ratio
pub(crate) fn fit_within(image: RgbImage, max_width: Option<u32>, max_height: Option<u32>) -> RgbImage {
    let (width, height) = (image.width(), image.height());
    let max_width = max_width.unwrap_or(width);
    let max_height = max_height.unwrap_or(height);

    if width <= max_width && height <= max_height {
        return image;
    }

    let ratio = (max_width as f32 / width as f32).min(max_height as f32 / height as f32);
    let new_width = ((width as f32 * ratio) as u32).max(1);
    let new_height = ((height as f32 * ratio) as u32).max(1);

    image::imageops::resize(
        &image,
        new_width,
        new_height,
        image::imageops::FilterType::Lanczos3,
    )
}

/// Encode an image as JPEG bytes
pub(crate) fn encode_jpeg(image: &RgbImage) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY).encode_image(image)?;
    Ok(buffer)
}
