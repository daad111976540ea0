use super::avcc::AvccConfig;
use super::r#box::find_box;
use crate::errors::{MemeshotResult, Mp4Error};

/// Bytes between the fourCC of a visual sample entry and its child boxes
const VISUAL_SAMPLE_ENTRY_SIZE: usize = 78;

/// First sample description of a video track
#[derive(Debug, Clone, PartialEq)]
pub struct VisualSampleEntry {
    pub codec: String,
    pub width: u16,
    pub height: u16,
    pub avcc: Option<AvccConfig>,
}

impl VisualSampleEntry {
    pub fn is_h264(&self) -> bool {
        matches!(self.codec.as_str(), "avc1" | "avc3")
    }
}

/// Parse the first entry of an `stsd` payload as a visual sample entry
pub fn parse_visual_sample_entry(stsd: &[u8]) -> MemeshotResult<VisualSampleEntry> {
    // Skip version and flags (4 bytes) and entry count (4 bytes)
    let entry = stsd
        .get(8..)
        .and_then(|rest| {
            let size = u32::from_be_bytes(rest.get(0..4)?.try_into().ok()?) as usize;
            rest.get(..size)
        })
        .ok_or_else(|| Mp4Error::new("stsd box has no complete sample entry"))?;
    if entry.len() < 8 + VISUAL_SAMPLE_ENTRY_SIZE {
        return Err(Mp4Error::new(format!(
            "visual sample entry too small: {} bytes",
            entry.len()
        ))
        .into());
    }

    let codec = String::from_utf8_lossy(&entry[4..8]).into_owned();
    let fields = &entry[8..];
    // reserved (6), data reference index (2), pre-defined and reserved (16)
    let width = u16::from_be_bytes([fields[24], fields[25]]);
    let height = u16::from_be_bytes([fields[26], fields[27]]);

    let avcc = find_box(&fields[VISUAL_SAMPLE_ENTRY_SIZE..], "avcC")
        .map(AvccConfig::parse)
        .transpose()?;

    Ok(VisualSampleEntry {
        codec,
        width,
        height,
        avcc,
    })
}
