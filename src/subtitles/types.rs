use serde::Serialize;

/// One subtitle cue after reconstruction: the start of its time range and
/// its dialogue, lowercased and merged onto a single line.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub timestamp: String,
    pub dialogue: String,
}

/// A filtered subtitle line, classified by its first character
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    /// Starts with a digit, e.g. `00:01:02,500 --> 00:01:04,000`
    Timestamp(String),
    /// Anything else. Consecutive dialogue lines are merged.
    Dialogue(String),
}

impl Line {
    pub fn classify(line: String) -> Self {
        if line.starts_with(|c: char| c.is_ascii_digit()) {
            Line::Timestamp(line)
        } else {
            Line::Dialogue(line)
        }
    }
}
