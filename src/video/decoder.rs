use crate::avc::{nalu_types, push_annexb, sample_to_annexb};
use crate::errors::{MemeshotResult, Mp4Error};
use crate::mp4::AvccConfig;
use image::RgbImage;
use log::debug;
use openh264::decoder::{DecodedYUV, Decoder};
use openh264::formats::YUVSource;

/// Decode a run of samples that starts at a sync sample.
///
/// A fresh decoder is primed with the track's SPS/PPS. Returns the last
/// picture the decoder produced, or `None` if it produced none.
pub(crate) fn decode_run(avcc: &AvccConfig, samples: &[Vec<u8>]) -> MemeshotResult<Option<RgbImage>> {
    let mut decoder = Decoder::new()
        .map_err(|e| Mp4Error::new(format!("Failed to create decoder: {}", e)))?;

    let mut parameter_sets = Vec::new();
    for nalu in avcc.sps.iter().chain(&avcc.pps) {
        push_annexb(&mut parameter_sets, nalu);
    }
    decoder
        .decode(&parameter_sets)
        .map_err(|e| Mp4Error::new(format!("Failed to initialize decoder with SPS/PPS: {}", e)))?;

    let mut picture = None;
    for (i, sample) in samples.iter().enumerate() {
        let stream = sample_to_annexb(sample, avcc.nalu_length_size)
            .ok_or_else(|| Mp4Error::new(format!("Malformed NAL units in sample {} of run", i)))?;
        debug!(
            "Decoding sample {} of {}: {:?}",
            i + 1,
            samples.len(),
            nalu_types(sample, avcc.nalu_length_size)
        );

        let decoded = decoder
            .decode(&stream)
            .map_err(|e| Mp4Error::new(format!("H.264 decoding failed: {}", e)))?;
        if let Some(yuv) = decoded {
            picture = Some(yuv_to_rgb(&yuv)?);
        }
    }
    Ok(picture)
}

fn yuv_to_rgb(yuv: &DecodedYUV<'_>) -> MemeshotResult<RgbImage> {
    let (width, height) = yuv.dimensions();
    let mut rgb_data = vec![0u8; yuv.rgb8_len()];
    yuv.write_rgb8(&mut rgb_data);
    RgbImage::from_raw(width as u32, height as u32, rgb_data)
        .ok_or_else(|| Mp4Error::new("Failed to create RgbImage from RGB data").into())
}
