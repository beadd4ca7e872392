use serde::Serialize;

use crate::cost::{CostError, KeyCosts};

/// A code together with the cumulative cost of producing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeCost {
    pub code: String,
    pub cost: f64,
}

impl CodeCost {
    pub fn new(code: impl Into<String>, cost: f64) -> Self {
        Self {
            code: code.into(),
            cost,
        }
    }

    /// The start-of-text sentinel: empty code at zero cost.
    pub fn empty() -> Self {
        Self::new(String::new(), 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// A raw dictionary line: `word` is typed as `code`; larger `weight` wins
/// the earlier (shorter) code when codes collide.
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub word: String,
    pub code: String,
    pub weight: f64,
}

impl DictEntry {
    pub fn new(word: impl Into<String>, code: impl Into<String>, weight: f64) -> Self {
        Self {
            word: word.into(),
            code: code.into(),
            weight,
        }
    }
}

/// Order entries for trie construction and attach their intrinsic code cost.
///
/// Priority: weight descending, then code length ascending, then intrinsic
/// cost ascending. Entries equal on all three keep their input order.
pub fn rank(
    entries: impl IntoIterator<Item = DictEntry>,
    costs: &KeyCosts,
) -> Result<Vec<(String, CodeCost)>, CostError> {
    let mut ranked = entries
        .into_iter()
        .map(|e| {
            let cost = costs.code_cost(&e.code)?;
            Ok((e, cost))
        })
        .collect::<Result<Vec<_>, CostError>>()?;
    ranked.sort_by(|(a, ca), (b, cb)| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.code.chars().count().cmp(&b.code.chars().count()))
            .then_with(|| ca.total_cmp(cb))
    });
    Ok(ranked
        .into_iter()
        .map(|(e, cost)| (e.word, CodeCost::new(e.code, cost)))
        .collect())
}
