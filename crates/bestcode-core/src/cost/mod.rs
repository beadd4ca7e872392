//! Key-pair cost storage.
//!
//! `KeyCosts` maps an ordered pair of output keys to the effort of typing the
//! second key right after the first. Pairs without an explicit cost fall back
//! to the mean of all known costs and are recorded in a miss set.

mod table;
mod table_io;

pub use table::KeyCosts;

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CostError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("key-pair cost set is empty")]
    EmptyCostSet,

    #[error("duplicate cost for key pair '{c1}{c2}'")]
    DuplicateCost { c1: char, c2: char },

    #[error("cannot compute the cost of an empty code")]
    EmptyCode,
}
