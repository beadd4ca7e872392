use std::collections::{HashMap, HashSet};

use tracing::{debug, debug_span};

use super::{rank, CodeCost, DictEntry, DictError};
use crate::cost::KeyCosts;

type NodeId = u32;

const ROOT: NodeId = 0;

/// Highest digit appended when disambiguating a code (select keys 2..=9).
const MAX_SELECT_DIGIT: u32 = 9;

/// Appended once the select digits run out; the next page starts from space.
const PAGE_BREAK: char = '=';

/// Prefix tree from dictionary words to their cheapest code.
///
/// Nodes live in one arena addressed by `NodeId`; edges are a single
/// `(parent, char) → child` map, so there is no per-node allocation.
pub struct WordCodeTrie {
    edges: HashMap<(NodeId, char), NodeId>,
    /// best[node] = cheapest code of the word spelled by the path to `node`
    best: Vec<Option<CodeCost>>,
    has_children: Vec<bool>,
    max_word_len: usize,
}

impl WordCodeTrie {
    /// Build from entries already in priority order (see [`rank`]).
    ///
    /// Each code still taken by an earlier entry is suffixed until unique
    /// (`ab` → `ab2` … `ab9` → `ab= ` → `ab=2` …), its cost is recomputed from
    /// the final code, and the word's node keeps it unless a strictly cheaper
    /// code is already stored there.
    pub fn build(
        entries: impl IntoIterator<Item = (String, CodeCost)>,
        costs: &KeyCosts,
    ) -> Result<Self, DictError> {
        let _span = debug_span!("build_trie").entered();
        let mut trie = Self {
            edges: HashMap::new(),
            best: vec![None],
            has_children: vec![false],
            max_word_len: 0,
        };
        let mut used: HashSet<String> = HashSet::new();
        let mut renamed = 0usize;
        let mut words = 0usize;

        for (word, cc) in entries {
            if word.is_empty() {
                debug!(code = %cc.code, "skipping entry with empty word");
                continue;
            }
            let code = distinct_code(&cc.code, &mut used);
            if code != cc.code {
                renamed += 1;
            }
            let cost = costs.code_cost(&code)?;

            let (node, word_len) = trie.insert_path(&word);
            trie.max_word_len = trie.max_word_len.max(word_len);
            let slot = &mut trie.best[node as usize];
            if !slot.as_ref().is_some_and(|existing| existing.cost <= cost) {
                *slot = Some(CodeCost { code, cost });
            }
            words += 1;
        }

        if trie.best.len() == 1 {
            return Err(DictError::EmptyIndex);
        }
        debug!(
            entries = words,
            renamed,
            nodes = trie.best.len(),
            max_word_len = trie.max_word_len
        );
        Ok(trie)
    }

    /// Rank raw entries and build the trie from them.
    pub fn from_entries(
        entries: impl IntoIterator<Item = DictEntry>,
        costs: &KeyCosts,
    ) -> Result<Self, DictError> {
        let ranked = rank(entries, costs)?;
        Self::build(ranked, costs)
    }

    /// Walk `word` from the root, creating missing nodes.
    /// Returns the terminal node and the word length in chars.
    fn insert_path(&mut self, word: &str) -> (NodeId, usize) {
        let mut node = ROOT;
        let mut len = 0;
        for c in word.chars() {
            let next_id = self.best.len() as NodeId;
            node = match self.edges.get(&(node, c)) {
                Some(&child) => child,
                None => {
                    self.edges.insert((node, c), next_id);
                    self.has_children[node as usize] = true;
                    self.best.push(None);
                    self.has_children.push(false);
                    next_id
                }
            };
            len += 1;
        }
        (node, len)
    }

    /// Collect the best code of every dictionary word that is a prefix of `text`.
    ///
    /// `out[d - 1]` receives the entry for the prefix of length `d` (`None`
    /// when that prefix is only an inner node). The walk stops at the first
    /// character without a matching child.
    ///
    /// Returns `true` when the walk consumed all of `text` while the last node
    /// still has children, i.e. a longer word might match once more text is
    /// available. Returns `false` when the trie itself ended the walk.
    pub fn candidates<'a>(&'a self, text: &[char], out: &mut Vec<Option<&'a CodeCost>>) -> bool {
        out.clear();
        let mut node = ROOT;
        for &c in text {
            match self.edges.get(&(node, c)) {
                Some(&child) => {
                    out.push(self.best[child as usize].as_ref());
                    node = child;
                }
                None => return false,
            }
        }
        self.has_children[node as usize]
    }

    /// Exact-match lookup of a word's best code.
    pub fn lookup(&self, word: &str) -> Option<&CodeCost> {
        let mut node = ROOT;
        for c in word.chars() {
            node = *self.edges.get(&(node, c))?;
        }
        self.best[node as usize].as_ref()
    }

    /// Length in chars of the longest dictionary word.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.best.len()
    }

    /// Iterate over every surviving code (one per distinct word).
    pub fn codes(&self) -> impl Iterator<Item = &CodeCost> {
        self.best.iter().flatten()
    }
}

/// Return `code` if unused, otherwise the first free disambiguated variant.
/// The returned code is marked as used.
fn distinct_code(code: &str, used: &mut HashSet<String>) -> String {
    if used.insert(code.to_string()) {
        return code.to_string();
    }
    let mut root = code.to_string();
    let mut digit = 2;
    loop {
        let candidate = if digit <= MAX_SELECT_DIGIT {
            digit += 1;
            format!("{root}{}", digit - 1)
        } else {
            root.push(PAGE_BREAK);
            digit = 2;
            format!("{root} ")
        };
        if used.insert(candidate.clone()) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_code_sequence() {
        let mut used = HashSet::new();
        let mut seen = Vec::new();
        for _ in 0..11 {
            seen.push(distinct_code("ab", &mut used));
        }
        assert_eq!(
            seen,
            vec!["ab", "ab2", "ab3", "ab4", "ab5", "ab6", "ab7", "ab8", "ab9", "ab= ", "ab=2"]
        );
    }

    #[test]
    fn test_distinct_code_second_page_break() {
        let mut used = HashSet::new();
        let codes: Vec<String> = (0..19).map(|_| distinct_code("q", &mut used)).collect();
        assert_eq!(codes[9], "q= ");
        assert_eq!(codes[17], "q=9");
        assert_eq!(codes[18], "q== ");
    }

    #[test]
    fn test_distinct_code_skips_taken_suffix() {
        let mut used = HashSet::new();
        used.insert("ab".to_string());
        used.insert("ab2".to_string());
        assert_eq!(distinct_code("ab", &mut used), "ab3");
    }
}
