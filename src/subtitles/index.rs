use super::parser::{filter_lines, merge_dialogue_blocks, pair_cues};
use super::types::Cue;
use super::utils::{contains_token, title_case};
use crate::errors::{FormatError, MemeshotError, MemeshotResult};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Timestamp to dialogue lookup built once from a subtitle file.
///
/// Keys are the `HH:MM:SS` start of each cue's time range. Entries keep the
/// order in which their key first appeared; a repeated key overwrites the
/// earlier dialogue in place.
#[derive(Debug, Clone, Default)]
pub struct SubtitleIndex {
    cues: Vec<Cue>,
    positions: HashMap<String, usize>,
}

impl SubtitleIndex {
    /// Read and index a subtitle file
    pub fn open<P: AsRef<Path>>(path: P) -> MemeshotResult<Self> {
        let path = path.as_ref();
        let mut file =
            File::open(path).map_err(|_| MemeshotError::SubtitleNotFound(path.to_path_buf()))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        info!("Read subtitle file {} ({} bytes)", path.display(), bytes.len());
        Self::from_text(&String::from_utf8_lossy(&bytes))
    }

    /// Index subtitle text already in memory
    pub fn from_text(text: &str) -> MemeshotResult<Self> {
        let lines = filter_lines(text);
        if lines.is_empty() {
            return Err(FormatError::new("no timestamps or dialogue found").into());
        }
        debug!("{} lines left after dropping numbers and blanks", lines.len());

        let merged = merge_dialogue_blocks(lines);
        let cues = pair_cues(merged)?;

        let mut index = SubtitleIndex::default();
        for cue in cues {
            index.insert(cue);
        }
        info!("Indexed {} subtitle cues", index.len());
        Ok(index)
    }

    fn insert(&mut self, cue: Cue) {
        match self.positions.get(&cue.timestamp) {
            Some(&pos) => {
                warn!(
                    "Duplicate timestamp {}: '{}' replaces '{}'",
                    cue.timestamp, cue.dialogue, self.cues[pos].dialogue
                );
                self.cues[pos].dialogue = cue.dialogue;
            }
            None => {
                self.positions.insert(cue.timestamp.clone(), self.cues.len());
                self.cues.push(cue);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Dialogue stored under a `HH:MM:SS` key
    pub fn get(&self, timestamp: &str) -> Option<&str> {
        self.positions
            .get(timestamp)
            .map(|&pos| self.cues[pos].dialogue.as_str())
    }

    pub fn cues(&self) -> impl Iterator<Item = &Cue> {
        self.cues.iter()
    }

    /// Cues whose dialogue contains `word` as a whole token, case-insensitively
    pub fn matches<'a>(&'a self, word: &str) -> impl Iterator<Item = &'a Cue> + 'a {
        let word = word.trim().to_lowercase();
        self.cues
            .iter()
            .filter(move |cue| contains_token(&cue.dialogue, &word))
    }

    /// Start times of every cue that says `word`
    pub fn timestamps_for(&self, word: &str) -> Vec<String> {
        self.matches(word).map(|cue| cue.timestamp.clone()).collect()
    }

    /// Title-cased dialogue of every cue that says `word`
    pub fn dialogues_for(&self, word: &str) -> Vec<String> {
        self.matches(word).map(|cue| title_case(&cue.dialogue)).collect()
    }
}
