//! Linking strategies: how two adjacent codes are joined.
//!
//! A link merges the best encoding so far (`prior`) with the code of the next
//! word (`next`), possibly inserting or removing a separator, and charges the
//! key-pair cost of the new boundary. `join` computes the cost and the edit
//! without allocating; `Join::apply` builds the string only when needed.

mod jd6;

use std::fmt;
use std::str::FromStr;

use crate::cost::KeyCosts;
use crate::dict::CodeCost;
use crate::settings::{settings, Jd6Keys};

const SPACE: char = ' ';

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("cannot link an empty code")]
    EmptyCode,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown link strategy '{0}' (expected nogap, spaceorpunct or jd6)")]
pub struct UnknownStrategy(pub String);

/// The closed set of linking policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStrategy {
    /// Codes are typed back to back.
    NoGap,
    /// A space separates a letter from a following letter or digit.
    SpaceOrPunct,
    /// Jd6 shape/phonetic auto-commit rules.
    Jd6,
}

impl FromStr for LinkStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nogap" => Ok(Self::NoGap),
            "spaceorpunct" => Ok(Self::SpaceOrPunct),
            "jd6" => Ok(Self::Jd6),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for LinkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoGap => "nogap",
            Self::SpaceOrPunct => "spaceorpunct",
            Self::Jd6 => "jd6",
        })
    }
}

/// The outcome of linking two codes, before the joined string is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Join {
    /// Total cost of the joined code.
    pub cost: f64,
    /// Remove the last char of the prior code.
    drop_prior_tail: bool,
    /// Char appended to the prior code.
    prior_suffix: Option<char>,
    /// Char appended to the next code.
    next_suffix: Option<char>,
}

impl Join {
    fn direct(cost: f64) -> Self {
        Self {
            cost,
            drop_prior_tail: false,
            prior_suffix: None,
            next_suffix: None,
        }
    }

    /// Build the joined code.
    pub fn apply(&self, prior: &str, next: &str) -> String {
        let keep = if self.drop_prior_tail {
            prior.char_indices().next_back().map_or(0, |(i, _)| i)
        } else {
            prior.len()
        };
        let mut code = String::with_capacity(keep + next.len() + 2);
        code.push_str(&prior[..keep]);
        if let Some(c) = self.prior_suffix {
            code.push(c);
        }
        code.push_str(next);
        if let Some(c) = self.next_suffix {
            code.push(c);
        }
        code
    }
}

/// A linking strategy bound to the cost table it charges against.
#[derive(Clone, Copy)]
pub struct Linker<'a> {
    strategy: LinkStrategy,
    costs: &'a KeyCosts,
    jd6: &'a Jd6Keys,
}

impl<'a> Linker<'a> {
    /// Linker using the Jd6 key classes from global settings.
    pub fn new(strategy: LinkStrategy, costs: &'a KeyCosts) -> Self {
        Self::with_jd6_keys(strategy, costs, &settings().jd6)
    }

    pub fn with_jd6_keys(strategy: LinkStrategy, costs: &'a KeyCosts, jd6: &'a Jd6Keys) -> Self {
        Self {
            strategy,
            costs,
            jd6,
        }
    }

    pub fn strategy(&self) -> LinkStrategy {
        self.strategy
    }

    pub fn costs(&self) -> &'a KeyCosts {
        self.costs
    }

    /// Cost and boundary edit of `prior` followed by `next`.
    ///
    /// An empty `prior` is the start of text: `next` is taken as is, with no
    /// leading transition (Jd6 may still pad it).
    pub fn join(&self, prior: &CodeCost, next: &CodeCost) -> Result<Join, LinkError> {
        let first = next.code.chars().next().ok_or(LinkError::EmptyCode)?;
        Ok(match self.strategy {
            LinkStrategy::NoGap => self.join_no_gap(prior, next, first),
            LinkStrategy::SpaceOrPunct => self.join_space_or_punct(prior, next, first),
            LinkStrategy::Jd6 => jd6::join(self.costs, self.jd6, prior, next, first),
        })
    }

    /// Join and build the resulting code.
    pub fn link(&self, prior: &CodeCost, next: &CodeCost) -> Result<CodeCost, LinkError> {
        let join = self.join(prior, next)?;
        Ok(CodeCost {
            code: join.apply(&prior.code, &next.code),
            cost: join.cost,
        })
    }

    fn join_no_gap(&self, prior: &CodeCost, next: &CodeCost, first: char) -> Join {
        let Some(last) = prior.code.chars().next_back() else {
            return Join::direct(next.cost);
        };
        Join::direct(prior.cost + self.costs.lookup(last, first) + next.cost)
    }

    fn join_space_or_punct(&self, prior: &CodeCost, next: &CodeCost, first: char) -> Join {
        let Some(last) = prior.code.chars().next_back() else {
            return Join::direct(next.cost);
        };
        if last.is_alphabetic() && first.is_alphanumeric() {
            let gap = self.costs.lookup(last, SPACE) + self.costs.lookup(SPACE, first);
            Join {
                prior_suffix: Some(SPACE),
                ..Join::direct(prior.cost + gap + next.cost)
            }
        } else {
            Join::direct(prior.cost + self.costs.lookup(last, first) + next.cost)
        }
    }
}
