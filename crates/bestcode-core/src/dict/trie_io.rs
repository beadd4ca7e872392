use std::fs;
use std::path::Path;

use tracing::debug;

use super::{DictEntry, DictError, WordCodeTrie};
use crate::cost::KeyCosts;

impl WordCodeTrie {
    /// Build from dictionary text (see [`parse_dict_text`]).
    pub fn from_text(text: &str, costs: &KeyCosts) -> Result<Self, DictError> {
        Self::from_entries(parse_dict_text(text), costs)
    }

    /// Load a dictionary file from disk.
    pub fn open(path: &Path, costs: &KeyCosts) -> Result<Self, DictError> {
        Self::from_text(&fs::read_to_string(path)?, costs)
    }
}

/// Parse RIME-style dictionary text into entries.
///
/// Everything after `#` is ignored. A line is `word\tcode` (weight 0) or
/// `word\tcode\tweight`. Lines of any other shape, with an empty word or code,
/// or with an unparseable weight are skipped.
pub fn parse_dict_text(text: &str) -> Vec<DictEntry> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for line in text.lines() {
        let bare = line.split_once('#').map_or(line, |(head, _)| head);
        match parse_line(bare) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }
    debug!(parsed = entries.len(), skipped, "dictionary text parsed");
    entries
}

fn parse_line(line: &str) -> Option<DictEntry> {
    let fields: Vec<&str> = line.split('\t').collect();
    let (word, code, weight) = match fields[..] {
        [word, code] => (word, code, 0.0),
        [word, code, weight] => (word, code, weight.trim().parse().ok()?),
        _ => return None,
    };
    if word.is_empty() || code.is_empty() {
        return None;
    }
    Some(DictEntry::new(word, code, weight))
}
