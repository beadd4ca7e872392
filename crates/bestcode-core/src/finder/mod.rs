//! Lowest-cost encoding of a text via dynamic programming over positions.
//!
//! `best[i]` holds the cheapest code for the first `i` characters. Positions
//! are relaxed left to right: every dictionary word starting at `i` is linked
//! onto `best[i]`, and a one-character fallback keeps every position reachable.
//!
//! Input is consumed in chunks. Whenever the scan reaches the furthest
//! reachable position, every later path must pass through it, so all but the
//! last two keys of its code are committed to the output and dropped from the
//! live window.

mod reader;
mod search;
#[cfg(test)]
mod tests;

use std::io::{self, Read};

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::dict::WordCodeTrie;
use crate::linker::{LinkError, Linker};
use crate::settings::settings;

use reader::CharChunks;
use search::Search;

#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    #[error("input text is empty")]
    EmptyInput,

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("search stalled: position {position} is unreachable")]
    Stalled { position: usize },
}

/// The optimal encoding of a whole text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Encoding {
    /// The complete output code.
    pub code: String,
    /// Total cost of `code`.
    pub cost: f64,
    /// Number of input characters encoded.
    pub text_len: usize,
}

/// One step of the optimal path: text `start..end` typed as `code`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    /// The word's own code, before linking.
    pub code: String,
    /// The character was not in the dictionary and is typed as itself.
    pub fallback: bool,
}

/// Runs the search for one dictionary and linking strategy.
#[derive(Clone, Copy)]
pub struct Finder<'a> {
    trie: &'a WordCodeTrie,
    linker: Linker<'a>,
    chunk_chars: usize,
}

impl<'a> Finder<'a> {
    pub fn new(trie: &'a WordCodeTrie, linker: Linker<'a>) -> Self {
        Self {
            trie,
            linker,
            chunk_chars: settings().search.chunk_chars,
        }
    }

    /// Characters fed to the search per streaming chunk (at least 1).
    pub fn with_chunk_chars(mut self, chunk_chars: usize) -> Self {
        self.chunk_chars = chunk_chars.max(1);
        self
    }

    pub fn chunk_chars(&self) -> usize {
        self.chunk_chars
    }

    /// Encode an in-memory text.
    pub fn find(&self, text: &str) -> Result<Encoding, FinderError> {
        let chars: Vec<char> = text.chars().collect();
        let _span = debug_span!("find", chars = chars.len()).entered();
        let mut search = Search::new(self.trie, self.linker, false);
        search.feed(&chars)?;
        let (encoding, _) = search.finish()?;
        debug!(cost = encoding.cost, code_len = encoding.code.len());
        Ok(encoding)
    }

    /// Encode an in-memory text and return the optimal path as well.
    pub fn segment(&self, text: &str) -> Result<(Encoding, Vec<Segment>), FinderError> {
        let chars: Vec<char> = text.chars().collect();
        let _span = debug_span!("segment", chars = chars.len()).entered();
        let mut search = Search::new(self.trie, self.linker, true);
        search.feed(&chars)?;
        search.finish()
    }

    /// Encode UTF-8 text read from `reader` in bounded memory.
    pub fn find_reader<R: Read>(&self, reader: R) -> Result<Encoding, FinderError> {
        self.find_reader_with(reader, |_| {})
    }

    /// Like [`find_reader`](Self::find_reader), calling `progress` with the
    /// number of characters read so far after each chunk.
    pub fn find_reader_with<R: Read>(
        &self,
        reader: R,
        mut progress: impl FnMut(usize),
    ) -> Result<Encoding, FinderError> {
        let _span = debug_span!("find_reader", chunk_chars = self.chunk_chars).entered();
        let mut chunks = CharChunks::new(reader, self.chunk_chars);
        let mut search = Search::new(self.trie, self.linker, false);
        let mut read = 0usize;
        while let Some(chunk) = chunks.next_chunk()? {
            read += chunk.len();
            search.feed(&chunk)?;
            debug!(read, window = search.window_len(), "chunk processed");
            progress(read);
        }
        let (encoding, _) = search.finish()?;
        debug!(cost = encoding.cost, text_len = encoding.text_len);
        Ok(encoding)
    }
}
