use std::fs;
use std::path::Path;

use tracing::debug;

use super::{CostError, KeyCosts};

impl KeyCosts {
    /// Build from cost-file text.
    ///
    /// One pair per line: `<c1><c2>\t<cost>`. The key field must be exactly two
    /// characters (space is a valid key). Lines that do not match are skipped.
    pub fn from_text(text: &str) -> Result<Self, CostError> {
        let mut pairs = Vec::new();
        let mut skipped = 0usize;
        for line in text.lines() {
            match parse_line(line) {
                Some(pair) => pairs.push(pair),
                None => skipped += 1,
            }
        }
        debug!(parsed = pairs.len(), skipped, "cost text parsed");
        Self::build(pairs)
    }

    /// Load a cost file from disk.
    pub fn open(path: &Path) -> Result<Self, CostError> {
        Self::from_text(&fs::read_to_string(path)?)
    }
}

fn parse_line(line: &str) -> Option<(char, char, f64)> {
    let (keys, cost) = line.split_once('\t')?;
    if cost.contains('\t') {
        return None;
    }
    let mut chars = keys.chars();
    let (c1, c2) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }
    let cost: f64 = cost.trim().parse().ok()?;
    Some((c1, c2, cost))
}
