use super::r#box::find_box;
use crate::bits::reader::{read_u32, read_u64};
use crate::errors::{MemeshotResult, Mp4Error};

/// Refuse tables claiming more samples than any sane video has
const MAX_SAMPLES: u32 = 50_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SttsEntry {
    pub sample_count: u32,
    pub sample_delta: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleToChunkEntry {
    pub first_chunk: u32,
    pub samples_per_chunk: u32,
}

/// Sample tables of one track (`stbl` children)
#[derive(Debug, Clone, Default)]
pub struct SampleTable {
    pub stts_entries: Vec<SttsEntry>,
    /// 1-based sync sample numbers; `None` when the track has no `stss`
    pub sync_samples: Option<Vec<u32>>,
    pub sample_to_chunk: Vec<SampleToChunkEntry>,
    pub sample_sizes: Vec<u32>,
    pub chunk_offsets: Vec<u64>,
}

/// Version/flags, entry count, then the entries of a full box table
fn table<'a>(stbl: &'a [u8], name: &str, entry_size: usize) -> MemeshotResult<(u32, &'a [u8])> {
    let payload = find_box(stbl, name)
        .ok_or_else(|| Mp4Error::new(format!("{} box not found in stbl box", name)))?;
    let mut pos = 4;
    let count = read_u32(payload, &mut pos)
        .ok_or_else(|| Mp4Error::new(format!("{} box too small", name)))?;
    let required = (count as usize)
        .checked_mul(entry_size)
        .and_then(|n| n.checked_add(pos))
        .unwrap_or(usize::MAX);
    if required > payload.len() {
        return Err(Mp4Error::new(format!(
            "{} box too small for {} entries: expected {} bytes, got {}",
            name,
            count,
            required,
            payload.len()
        ))
        .into());
    }
    Ok((count, &payload[pos..required]))
}

fn u32_entries(entries: &[u8]) -> impl Iterator<Item = u32> + '_ {
    entries
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
}

pub fn parse_stts(stbl: &[u8]) -> MemeshotResult<Vec<SttsEntry>> {
    let (_, entries) = table(stbl, "stts", 8)?;
    Ok(entries
        .chunks_exact(8)
        .map(|c| SttsEntry {
            sample_count: u32::from_be_bytes([c[0], c[1], c[2], c[3]]),
            sample_delta: u32::from_be_bytes([c[4], c[5], c[6], c[7]]),
        })
        .collect())
}

/// Sync samples are optional: every sample is a sync sample without `stss`
pub fn parse_stss(stbl: &[u8]) -> MemeshotResult<Option<Vec<u32>>> {
    if find_box(stbl, "stss").is_none() {
        return Ok(None);
    }
    let (_, entries) = table(stbl, "stss", 4)?;
    Ok(Some(u32_entries(entries).collect()))
}

pub fn parse_stsc(stbl: &[u8]) -> MemeshotResult<Vec<SampleToChunkEntry>> {
    let (_, entries) = table(stbl, "stsc", 12)?;
    Ok(entries
        .chunks_exact(12)
        .map(|c| SampleToChunkEntry {
            first_chunk: u32::from_be_bytes([c[0], c[1], c[2], c[3]]),
            samples_per_chunk: u32::from_be_bytes([c[4], c[5], c[6], c[7]]),
        })
        .collect())
}

pub fn parse_stsz(stbl: &[u8]) -> MemeshotResult<Vec<u32>> {
    let stsz = find_box(stbl, "stsz").ok_or_else(|| Mp4Error::new("stsz box not found in stbl box"))?;
    let mut pos = 4;
    let (sample_size, sample_count) = match (read_u32(stsz, &mut pos), read_u32(stsz, &mut pos)) {
        (Some(size), Some(count)) => (size, count),
        _ => return Err(Mp4Error::new("stsz box too small: expected at least 12 bytes").into()),
    };

    if sample_count > MAX_SAMPLES {
        return Err(Mp4Error::new(format!("stsz claims {} samples", sample_count)).into());
    }
    if sample_size != 0 {
        // All samples have the same size
        return Ok(vec![sample_size; sample_count as usize]);
    }
    let needed = sample_count as usize * 4;
    let entries = stsz.get(pos..pos + needed).ok_or_else(|| {
        Mp4Error::new(format!(
            "stsz box too small for {} samples: expected {} bytes, got {}",
            sample_count,
            pos + needed,
            stsz.len()
        ))
    })?;
    Ok(u32_entries(entries).collect())
}

/// Chunk offsets from `stco` (32-bit) or `co64` (64-bit)
pub fn parse_chunk_offsets(stbl: &[u8]) -> MemeshotResult<Vec<u64>> {
    if find_box(stbl, "stco").is_some() {
        let (_, entries) = table(stbl, "stco", 4)?;
        return Ok(u32_entries(entries).map(u64::from).collect());
    }
    if find_box(stbl, "co64").is_some() {
        let (_, entries) = table(stbl, "co64", 8)?;
        let mut pos = 0;
        let mut offsets = Vec::with_capacity(entries.len() / 8);
        while let Some(offset) = read_u64(entries, &mut pos) {
            offsets.push(offset);
        }
        return Ok(offsets);
    }
    Err(Mp4Error::new("No chunk offset box found: missing both stco and co64").into())
}

impl SampleTable {
    pub fn parse(stbl: &[u8]) -> MemeshotResult<Self> {
        Ok(Self {
            stts_entries: parse_stts(stbl)?,
            sync_samples: parse_stss(stbl)?,
            sample_to_chunk: parse_stsc(stbl)?,
            sample_sizes: parse_stsz(stbl)?,
            chunk_offsets: parse_chunk_offsets(stbl)?,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.sample_sizes.len()
    }

    /// `stts` runs clipped to the samples `stsz` actually lists
    fn timed_runs(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        let mut remaining = self.sample_count() as u64;
        self.stts_entries.iter().map(move |entry| {
            let count = (entry.sample_count as u64).min(remaining);
            remaining -= count;
            (count, entry.sample_delta as u64)
        })
    }

    /// Decode time of every sample, in timescale units
    pub fn sample_times(&self) -> Vec<u64> {
        let mut times = Vec::with_capacity(self.sample_count());
        let mut time = 0u64;
        for (count, delta) in self.timed_runs() {
            for _ in 0..count {
                times.push(time);
                time = time.saturating_add(delta);
            }
        }
        times
    }

    /// Total duration covered by `stts`, in timescale units
    pub fn total_duration(&self) -> u64 {
        self.timed_runs()
            .map(|(count, delta)| count.saturating_mul(delta))
            .fold(0, u64::saturating_add)
    }

    /// File offset of every sample, resolved through the chunk tables
    pub fn sample_offsets(&self) -> MemeshotResult<Vec<u64>> {
        let mut offsets = Vec::with_capacity(self.sample_count());
        let chunk_count = self.chunk_offsets.len() as u32;

        for (i, entry) in self.sample_to_chunk.iter().enumerate() {
            let next_first_chunk = self
                .sample_to_chunk
                .get(i + 1)
                .map(|e| e.first_chunk)
                .unwrap_or(chunk_count + 1);
            if entry.first_chunk == 0 || next_first_chunk < entry.first_chunk {
                return Err(Mp4Error::new("stsc entries out of order").into());
            }

            for chunk in entry.first_chunk..next_first_chunk {
                let mut offset = *self
                    .chunk_offsets
                    .get(chunk as usize - 1)
                    .ok_or_else(|| Mp4Error::new(format!("chunk {} has no offset", chunk)))?;
                for _ in 0..entry.samples_per_chunk {
                    let Some(&size) = self.sample_sizes.get(offsets.len()) else {
                        return Ok(offsets);
                    };
                    offsets.push(offset);
                    offset = offset.checked_add(size as u64).ok_or_else(|| {
                        Mp4Error::new(format!("chunk {} runs past the end of a 64-bit file", chunk))
                    })?;
                }
            }
        }

        if offsets.len() < self.sample_count() {
            return Err(Mp4Error::new(format!(
                "chunk tables cover {} of {} samples",
                offsets.len(),
                self.sample_count()
            ))
            .into());
        }
        Ok(offsets)
    }

    /// Whether a 0-based sample index is a sync sample (I-frame)
    pub fn is_sync(&self, sample: usize) -> bool {
        match &self.sync_samples {
            Some(sync) => sync.binary_search(&(sample as u32 + 1)).is_ok(),
            None => true,
        }
    }

    /// The nearest sync sample at or before a 0-based sample index
    pub fn sync_sample_before(&self, sample: usize) -> usize {
        (0..=sample).rev().find(|&s| self.is_sync(s)).unwrap_or(0)
    }
}
