use super::types::{to_millis, VideoTrack};
use crate::errors::{MemeshotResult, Mp4Error};
use crate::mp4::{
    find_box, find_path, find_video_trak, parse_mdhd, parse_visual_sample_entry,
    read_moov_payload, SampleTable,
};
use log::{debug, info};
use std::io::{Read, Seek};

/// Read the movie header of a file and analyse its first video track
pub(crate) fn analyze_video<R: Read + Seek>(reader: &mut R) -> MemeshotResult<VideoTrack> {
    let moov = read_moov_payload(reader)?;
    analyze_video_track(&moov)
}

/// Analyze the video track from moov payload to extract all timing and location information
pub(crate) fn analyze_video_track(moov_payload: &[u8]) -> MemeshotResult<VideoTrack> {
    let trak = find_video_trak(moov_payload).ok_or_else(|| Mp4Error::new("No video track"))?;
    let mdia = find_box(trak, "mdia").ok_or_else(|| Mp4Error::new("No mdia box"))?;
    let mdhd = find_box(mdia, "mdhd").ok_or_else(|| Mp4Error::new("No mdhd box"))?;
    let stbl = find_path(mdia, &["minf", "stbl"]).ok_or_else(|| Mp4Error::new("No stbl box"))?;
    let stsd = find_box(stbl, "stsd").ok_or_else(|| Mp4Error::new("No stsd box"))?;

    let (timescale, _) = parse_mdhd(mdhd)?;
    let entry = parse_visual_sample_entry(stsd)?;
    if !entry.is_h264() {
        return Err(Mp4Error::new(format!("Unsupported video codec '{}'", entry.codec)).into());
    }
    let avcc = entry
        .avcc
        .filter(|avcc| avcc.is_valid())
        .ok_or_else(|| Mp4Error::new("H.264 track without SPS/PPS"))?;

    let table = SampleTable::parse(stbl)?;
    let sample_offsets = table.sample_offsets()?;
    let sample_times_ms: Vec<u64> = table
        .sample_times()
        .into_iter()
        .map(|time| to_millis(time, timescale))
        .collect();
    if sample_times_ms.len() != table.sample_count() {
        debug!(
            "stts covers {} samples, stsz lists {}",
            sample_times_ms.len(),
            table.sample_count()
        );
    }
    let duration_ms = to_millis(table.total_duration(), timescale);

    info!(
        "Video track: {}x{} {}, {} samples, {} ms",
        entry.width,
        entry.height,
        entry.codec,
        sample_times_ms.len(),
        duration_ms
    );

    Ok(VideoTrack {
        timescale,
        width: entry.width,
        height: entry.height,
        duration_ms,
        sample_times_ms,
        sample_offsets,
        table,
        avcc,
    })
}
