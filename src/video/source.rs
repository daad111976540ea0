use super::analyzer::analyze_video;
use super::decoder::decode_run;
use super::types::{TrackState, VideoTrack};
use crate::errors::MemeshotResult;
use crate::frames::VideoSource;
use image::RgbImage;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// H.264 video stored in an MP4 file
pub struct Mp4VideoSource {
    path: PathBuf,
    reader: BufReader<File>,
    file_len: u64,
    position_ms: u64,
    state: TrackState,
}

impl Mp4VideoSource {
    /// Open the file. The container is not looked at until the first read.
    pub fn open<P: AsRef<Path>>(path: P) -> MemeshotResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let file_len = file.metadata()?.len();
        Ok(Self {
            path,
            reader: BufReader::new(file),
            file_len,
            position_ms: 0,
            state: TrackState::Unloaded,
        })
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// The analysed video track, if the file turned out to contain one
    pub fn track(&mut self) -> Option<&VideoTrack> {
        self.load_track();
        match &self.state {
            TrackState::Ready(track) => Some(track),
            _ => None,
        }
    }

    fn load_track(&mut self) {
        if !matches!(self.state, TrackState::Unloaded) {
            return;
        }
        self.state = match analyze_video(&mut self.reader) {
            Ok(track) => {
                info!("Loaded video track of {}", self.path.display());
                TrackState::Ready(Box::new(track))
            }
            Err(e) => {
                warn!("{} is not a readable video: {}", self.path.display(), e);
                TrackState::Unusable
            }
        };
    }
}

/// Read the raw bytes of a range of samples.
///
/// A sample that does not fit inside the file fails with `UnexpectedEof`
/// before anything is allocated for it.
pub(super) fn read_samples<R: Read + Seek>(
    reader: &mut R,
    file_len: u64,
    track: &VideoTrack,
    samples: RangeInclusive<usize>,
) -> io::Result<Vec<Vec<u8>>> {
    samples
        .map(|sample| {
            let (offset, size) = track.sample_location(sample).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, format!("sample {} has no location", sample))
            })?;
            let end = offset.checked_add(size as u64);
            if end.map_or(true, |end| end > file_len) {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("sample {} ends past the end of the file", sample),
                ));
            }
            let mut data = vec![0u8; size as usize];
            reader.seek(SeekFrom::Start(offset))?;
            reader.read_exact(&mut data)?;
            Ok(data)
        })
        .collect()
}

impl VideoSource for Mp4VideoSource {
    fn seek(&mut self, millis: u64) {
        self.position_ms = millis;
    }

    fn read_frame(&mut self) -> MemeshotResult<Option<RgbImage>> {
        self.load_track();
        let track = match &self.state {
            TrackState::Ready(track) => track,
            _ => {
                warn!("No video track to read from in {}", self.path.display());
                return Ok(None);
            }
        };

        let Some(target) = track.sample_at(self.position_ms) else {
            debug!(
                "{} ms is past the end of the video ({} ms)",
                self.position_ms, track.duration_ms
            );
            return Ok(None);
        };
        let start = track.table.sync_sample_before(target);
        debug!(
            "Frame at {} ms is sample {}, decoding from sync sample {}",
            self.position_ms, target, start
        );

        let samples = match read_samples(&mut self.reader, self.file_len, track, start..=target) {
            Ok(samples) => samples,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                warn!("Video ends before the frame at {} ms: {}", self.position_ms, e);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        match decode_run(&track.avcc, &samples) {
            Ok(Some(frame)) => Ok(Some(frame)),
            Ok(None) => {
                warn!("Decoder produced no picture at {} ms", self.position_ms);
                Ok(None)
            }
            Err(e) => {
                warn!("Could not decode frame at {} ms: {}", self.position_ms, e);
                Ok(None)
            }
        }
    }
}
