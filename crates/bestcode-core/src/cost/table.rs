use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::CostError;

/// Pairs in a full 46-key layout.
const TYPICAL_PAIRS: usize = 46 * 46;

/// A key-pair cost table mapping `(c1, c2)` → cost of typing `c2` after `c1`.
///
/// Lookups of absent pairs return the mean of all stored costs and record the
/// pair in the miss set. The miss set sits behind a mutex that is only taken
/// on a miss, so the table can be shared with a concurrent reader (e.g. a
/// report pass) without changing the hot path.
pub struct KeyCosts {
    costs: HashMap<(char, char), f64>,
    mean: f64,
    missing: Mutex<BTreeSet<(char, char)>>,
}

impl KeyCosts {
    /// Build a table from `(c1, c2, cost)` triples.
    ///
    /// Fails with `DuplicateCost` on the first repeated pair and with
    /// `EmptyCostSet` when no triple is given.
    pub fn build(pairs: impl IntoIterator<Item = (char, char, f64)>) -> Result<Self, CostError> {
        let mut costs = HashMap::with_capacity(TYPICAL_PAIRS);
        let mut sum = 0.0;
        for (c1, c2, cost) in pairs {
            if costs.insert((c1, c2), cost).is_some() {
                return Err(CostError::DuplicateCost { c1, c2 });
            }
            sum += cost;
        }
        if costs.is_empty() {
            return Err(CostError::EmptyCostSet);
        }
        let mean = sum / costs.len() as f64;
        debug!(pairs = costs.len(), mean, "key costs built");
        Ok(Self {
            costs,
            mean,
            missing: Mutex::new(BTreeSet::new()),
        })
    }

    /// Cost of typing `c2` right after `c1`.
    /// Absent pairs cost the mean and are recorded once in the miss set.
    pub fn lookup(&self, c1: char, c2: char) -> f64 {
        match self.costs.get(&(c1, c2)) {
            Some(&cost) => cost,
            None => {
                self.missing_set().insert((c1, c2));
                self.mean
            }
        }
    }

    /// Sum of `lookup` over every adjacent pair in `code`.
    /// A single-key code costs 0.
    pub fn code_cost(&self, code: &str) -> Result<f64, CostError> {
        let mut chars = code.chars();
        let Some(mut prev) = chars.next() else {
            return Err(CostError::EmptyCode);
        };
        let mut total = 0.0;
        for c in chars {
            total += self.lookup(prev, c);
            prev = c;
        }
        Ok(total)
    }

    /// Mean of all stored costs, used as the default for absent pairs.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Snapshot of the pairs queried so far without a stored cost, sorted.
    pub fn missing(&self) -> Vec<(char, char)> {
        self.missing_set().iter().copied().collect()
    }

    pub fn missing_count(&self) -> usize {
        self.missing_set().len()
    }

    fn missing_set(&self) -> MutexGuard<'_, BTreeSet<(char, char)>> {
        self.missing.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for KeyCosts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyCosts")
            .field("pairs", &self.costs.len())
            .field("mean", &self.mean)
            .field("missing", &self.missing_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KeyCosts {
        KeyCosts::build([('a', 'b', 1.0), ('b', 'a', 3.0), ('a', 'a', 2.0)]).unwrap()
    }

    #[test]
    fn test_lookup_present() {
        let costs = sample();
        assert_eq!(costs.lookup('a', 'b'), 1.0);
        assert_eq!(costs.lookup('b', 'a'), 3.0);
        assert_eq!(costs.missing_count(), 0);
    }

    #[test]
    fn test_mean() {
        let costs = sample();
        assert!((costs.mean() - 2.0).abs() < f64::EPSILON);
        assert_eq!(costs.len(), 3);
    }

    #[test]
    fn test_missing_pair_falls_back_to_mean() {
        let costs = sample();
        assert_eq!(costs.lookup('Z', '9'), costs.mean());
        assert_eq!(costs.missing(), vec![('Z', '9')]);
        // Same pair again does not grow the set
        assert_eq!(costs.lookup('Z', '9'), costs.mean());
        assert_eq!(costs.missing_count(), 1);
    }

    #[test]
    fn test_missing_is_idempotent_across_many_queries() {
        let costs = sample();
        for _ in 0..100 {
            costs.lookup('x', 'y');
            costs.lookup('y', 'x');
        }
        assert_eq!(costs.missing(), vec![('x', 'y'), ('y', 'x')]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = KeyCosts::build([('a', 'b', 1.0), ('a', 'b', 2.0)]).unwrap_err();
        assert!(matches!(err, CostError::DuplicateCost { c1: 'a', c2: 'b' }));
    }

    #[test]
    fn test_empty_rejected() {
        let err = KeyCosts::build(std::iter::empty()).unwrap_err();
        assert!(matches!(err, CostError::EmptyCostSet));
    }

    #[test]
    fn test_code_cost() {
        let costs = sample();
        // ab + ba + aa
        assert_eq!(costs.code_cost("abaa").unwrap(), 1.0 + 3.0 + 2.0);
        assert_eq!(costs.code_cost("a").unwrap(), 0.0);
        assert!(matches!(costs.code_cost(""), Err(CostError::EmptyCode)));
    }

    #[test]
    fn test_code_cost_records_misses() {
        let costs = sample();
        let total = costs.code_cost("abc").unwrap();
        assert_eq!(total, 1.0 + costs.mean());
        assert_eq!(costs.missing(), vec![('b', 'c')]);
    }

    #[test]
    fn test_shared_across_threads() {
        let costs = sample();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..50 {
                        costs.lookup('q', 'r');
                    }
                });
            }
        });
        assert_eq!(costs.missing(), vec![('q', 'r')]);
    }
}
