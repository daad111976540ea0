use crate::mp4::{AvccConfig, SampleTable};

/// Everything needed to locate and decode the samples of a video track
#[derive(Debug, Clone)]
pub struct VideoTrack {
    pub timescale: u32,
    pub width: u16,
    pub height: u16,
    /// End of the last sample, in milliseconds
    pub duration_ms: u64,
    /// Start of every sample, in milliseconds
    pub sample_times_ms: Vec<u64>,
    pub sample_offsets: Vec<u64>,
    pub table: SampleTable,
    pub avcc: AvccConfig,
}

impl VideoTrack {
    pub fn sample_count(&self) -> usize {
        self.sample_times_ms.len()
    }

    /// The last sample starting at or before `millis`, or `None` past the end
    pub fn sample_at(&self, millis: u64) -> Option<usize> {
        if millis >= self.duration_ms {
            return None;
        }
        self.sample_times_ms
            .partition_point(|&start| start <= millis)
            .checked_sub(1)
    }

    /// File offset and size of a sample
    pub fn sample_location(&self, sample: usize) -> Option<(u64, u32)> {
        Some((
            *self.sample_offsets.get(sample)?,
            *self.table.sample_sizes.get(sample)?,
        ))
    }
}

pub(crate) enum TrackState {
    /// Nothing has been read from the file yet
    Unloaded,
    Ready(Box<VideoTrack>),
    /// Analysis failed; no frame will ever be produced
    Unusable,
}

/// Convert a time in track units to milliseconds
pub(crate) fn to_millis(time: u64, timescale: u32) -> u64 {
    (time as u128 * 1000 / timescale as u128) as u64
}
