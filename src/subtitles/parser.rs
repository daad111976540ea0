use super::types::{Cue, Line};
use super::utils::{is_blank, is_sequence_number, is_time_range, strip_bom};
use crate::errors::{FormatError, MemeshotResult};
use log::{debug, warn};

/// Drop sequence numbers and blank lines, lowercase the rest
pub(crate) fn filter_lines(text: &str) -> Vec<String> {
    strip_bom(text)
        .lines()
        .filter(|line| !is_sequence_number(line) && !is_blank(line))
        .map(|line| line.trim_end().to_lowercase())
        .collect()
}

/// Classify a filtered line, keeping digit-led text that is not a time range
/// as dialogue (e.g. "2 more days").
fn classify(line: String) -> Line {
    match Line::classify(line) {
        Line::Timestamp(text) if !is_time_range(&text) => {
            debug!("'{}' starts with a digit but has no time range", text);
            Line::Dialogue(text)
        }
        line => line,
    }
}

/// Merge every run of consecutive dialogue lines into one line.
///
/// The cursor jumps past each consumed run, so a run is only ever read from
/// its first line and yields exactly one merged dialogue. The result
/// alternates timestamp, dialogue, timestamp, dialogue for well formed input.
pub(crate) fn merge_dialogue_blocks(lines: Vec<String>) -> Vec<Line> {
    let mut merged = Vec::with_capacity(lines.len());
    let mut lines = lines.into_iter().map(classify).peekable();

    while let Some(line) = lines.next() {
        match line {
            Line::Timestamp(_) => merged.push(line),
            Line::Dialogue(first) => {
                let mut dialogue = first;
                while let Some(Line::Dialogue(next)) = lines.peek() {
                    dialogue.push(' ');
                    dialogue.push_str(next);
                    lines.next();
                }
                merged.push(Line::Dialogue(dialogue));
            }
        }
    }

    merged
}

/// Pair merged lines into cues.
///
/// Each dialogue is paired with the timestamp right before it. A timestamp
/// with no dialogue, a dialogue with no timestamp, or a timestamp without a
/// key is skipped with a warning so the rest of the file stays searchable.
/// Fails only when not a single cue could be paired.
pub(crate) fn pair_cues(lines: Vec<Line>) -> MemeshotResult<Vec<Cue>> {
    let mut cues = Vec::with_capacity(lines.len() / 2);
    let mut pending: Option<String> = None;

    for line in lines {
        match line {
            Line::Timestamp(timestamp) => {
                if let Some(skipped) = pending.replace(timestamp) {
                    warn!("Skipping timestamp '{}': no dialogue follows it", skipped);
                }
            }
            Line::Dialogue(dialogue) => match pending.take() {
                Some(timestamp) => match timestamp_key(&timestamp) {
                    Ok(key) => cues.push(Cue {
                        timestamp: key,
                        dialogue,
                    }),
                    Err(e) => warn!("Skipping '{}': {}", dialogue, e),
                },
                None => warn!("Skipping dialogue '{}': no timestamp before it", dialogue),
            },
        }
    }
    if let Some(timestamp) = pending {
        debug!("Ignoring trailing timestamp '{}'", timestamp);
    }

    if cues.is_empty() {
        return Err(FormatError::new("no timestamp could be paired with dialogue").into());
    }
    Ok(cues)
}

/// Lookup key of a timestamp line: everything before the first comma
pub(crate) fn timestamp_key(line: &str) -> MemeshotResult<String> {
    match line.split_once(',') {
        Some((start, _)) => Ok(start.trim().to_string()),
        None => Err(FormatError::new(format!(
            "timestamp line '{}' has no millisecond separator",
            line
        ))
        .into()),
    }
}
