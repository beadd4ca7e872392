//! Jd6 auto-commit rules.
//!
//! A short code ending in a phonetic key needs a trailing space to commit.
//! A code starting with a shape key or a digit cannot auto-commit the word
//! before it, so a prior ending in a phonetic key (or phonetic + shape) gets a
//! space first. A padding space directly before punctuation is redundant and
//! is taken back.

use super::{Join, SPACE};
use crate::cost::KeyCosts;
use crate::dict::CodeCost;
use crate::settings::Jd6Keys;

/// Codes shorter than this commit only with a trailing space.
const FULL_CODE_LEN: usize = 4;

pub(super) fn join(
    costs: &KeyCosts,
    keys: &Jd6Keys,
    prior: &CodeCost,
    next: &CodeCost,
    first: char,
) -> Join {
    let mut next_cost = next.cost;
    let mut next_suffix = None;
    if let Some(next_last) = next.code.chars().next_back() {
        if keys.is_phonetic(next_last) && next.code.chars().count() < FULL_CODE_LEN {
            next_suffix = Some(SPACE);
            next_cost += costs.lookup(next_last, SPACE);
        }
    }

    let mut tail = prior.code.chars().rev();
    let Some(last) = tail.next() else {
        return Join {
            next_suffix,
            ..Join::direct(next_cost)
        };
    };
    let before_last = tail.next();

    let detached = keys.is_shape(first) || first.is_ascii_digit();
    let ends_phonetic_shape =
        before_last.is_some_and(|p| keys.is_phonetic(p) && keys.is_shape(last));

    let mut prior_cost = prior.cost;
    let mut prior_suffix = None;
    let mut drop_prior_tail = false;
    let boundary = if detached && (keys.is_phonetic(last) || ends_phonetic_shape) {
        prior_suffix = Some(SPACE);
        prior_cost += costs.lookup(last, SPACE);
        SPACE
    } else if let Some(p) = before_last.filter(|&p| {
        keys.is_phonetic(p) && last == SPACE && first != SPACE && !first.is_alphanumeric()
    }) {
        drop_prior_tail = true;
        prior_cost -= costs.lookup(p, SPACE);
        p
    } else {
        last
    };

    Join {
        cost: prior_cost + costs.lookup(boundary, first) + next_cost,
        drop_prior_tail,
        prior_suffix,
        next_suffix,
    }
}
