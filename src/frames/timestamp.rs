use crate::errors::{MemeshotError, MemeshotResult};
use regex::Regex;
use std::sync::OnceLock;

/// Seconds added to every cue start so the grab lands after the cut
pub const CAPTURE_OFFSET_SECS: u64 = 5;

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{2}):([0-5]\d):([0-5]\d)$").expect("timestamp pattern is valid")
    })
}

/// Convert a `HH:MM:SS` cue start into the second to grab a frame at.
///
/// The result is the total number of seconds plus [`CAPTURE_OFFSET_SECS`].
pub fn timestamp_to_seconds(timestamp: &str) -> MemeshotResult<u64> {
    let caps = timestamp_pattern()
        .captures(timestamp)
        .ok_or_else(|| MemeshotError::InvalidTimestamp(timestamp.to_string()))?;

    let mut total = 0u64;
    for group in 1..=3 {
        let value: u64 = caps[group]
            .parse()
            .map_err(|_| MemeshotError::InvalidTimestamp(timestamp.to_string()))?;
        total = total * 60 + value;
    }

    Ok(total + CAPTURE_OFFSET_SECS)
}
