//! Word-code dictionary.
//!
//! `WordCodeTrie` maps every dictionary word to the cheapest code assigned to
//! it. Codes are made globally unique while building, in entry priority order.

mod entry;
mod trie;
mod trie_io;

pub use entry::{rank, CodeCost, DictEntry};
pub use trie::WordCodeTrie;
pub use trie_io::parse_dict_text;

use std::io;

use crate::cost::CostError;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("dictionary produced no trie nodes")]
    EmptyIndex,

    #[error(transparent)]
    Cost(#[from] CostError),
}
