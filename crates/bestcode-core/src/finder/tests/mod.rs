mod basic;

use crate::cost::KeyCosts;
use crate::dict::{DictEntry, WordCodeTrie};
use crate::settings::Jd6Keys;

/// Every pair costs 1.0, so only the number of transitions matters.
fn unit_costs() -> KeyCosts {
    KeyCosts::build([('#', '#', 1.0)]).unwrap()
}

/// 天气预报 is typed as a single key, so it wins whenever it is fully visible.
fn weather_trie(costs: &KeyCosts) -> WordCodeTrie {
    let entries = vec![
        DictEntry::new("天", "t", 0.0),
        DictEntry::new("天气", "tq", 0.0),
        DictEntry::new("天气预报", "w", 0.0),
        DictEntry::new("气", "q", 0.0),
        DictEntry::new("预", "y", 0.0),
        DictEntry::new("报", "b", 0.0),
        DictEntry::new("好", "h", 0.0),
    ];
    WordCodeTrie::from_entries(entries, costs).unwrap()
}

fn jd6_keys() -> Jd6Keys {
    Jd6Keys::new("aiouv", "bcdfghjklmnpqrstwxyz").unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
