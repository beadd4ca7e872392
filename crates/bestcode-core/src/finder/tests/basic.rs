use super::{assert_close, unit_costs, weather_trie};
use crate::cost::KeyCosts;
use crate::dict::{DictEntry, WordCodeTrie};
use crate::finder::{Encoding, Finder, FinderError};
use crate::linker::{LinkStrategy, Linker};

fn pq_costs() -> KeyCosts {
    KeyCosts::build([('p', 'q', 0.2), ('p', ' ', 0.3), (' ', 'q', 0.4)]).unwrap()
}

fn ab_trie(costs: &KeyCosts) -> WordCodeTrie {
    let entries = vec![DictEntry::new("a", "p", 0.0), DictEntry::new("b", "q", 0.0)];
    WordCodeTrie::from_entries(entries, costs).unwrap()
}

#[test]
fn test_single_word() {
    let costs = KeyCosts::build([('x', 'y', 1.0)]).unwrap();
    let trie = WordCodeTrie::from_entries([DictEntry::new("ab", "xy", 0.0)], &costs).unwrap();
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::NoGap, &costs));
    let encoding = finder.find("ab").unwrap();
    assert_eq!(
        encoding,
        Encoding {
            code: "xy".to_string(),
            cost: 1.0,
            text_len: 2,
        }
    );
}

#[test]
fn test_two_words_no_gap() {
    let costs = pq_costs();
    let trie = ab_trie(&costs);
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::NoGap, &costs));
    let encoding = finder.find("ab").unwrap();
    assert_eq!(encoding.code, "pq");
    assert_close(encoding.cost, 0.2);
}

#[test]
fn test_two_words_space_or_punct() {
    let costs = pq_costs();
    let trie = ab_trie(&costs);
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::SpaceOrPunct, &costs));
    let encoding = finder.find("ab").unwrap();
    assert_eq!(encoding.code, "p q");
    assert_close(encoding.cost, 0.3 + 0.4);
}

#[test]
fn test_longer_word_wins_when_cheaper() {
    let costs = pq_costs();
    let entries = vec![
        DictEntry::new("a", "p", 0.0),
        DictEntry::new("b", "q", 0.0),
        DictEntry::new("ab", "x", 0.0),
    ];
    let trie = WordCodeTrie::from_entries(entries, &costs).unwrap();
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::NoGap, &costs));
    let encoding = finder.find("abab").unwrap();
    // x→x misses and costs the mean
    assert_eq!(encoding.code, "xx");
    assert_close(encoding.cost, costs.mean());
}

#[test]
fn test_unknown_char_falls_back_to_itself() {
    let costs = pq_costs();
    let trie = ab_trie(&costs);
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::NoGap, &costs));
    let encoding = finder.find("a?b").unwrap();
    assert_eq!(encoding.code, "p?q");
    assert_close(encoding.cost, 2.0 * costs.mean());
    assert_eq!(costs.missing(), vec![('?', 'q'), ('p', '?')]);
}

#[test]
fn test_text_without_dictionary_words() {
    let costs = unit_costs();
    let trie = weather_trie(&costs);
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::NoGap, &costs));
    let encoding = finder.find("xyz").unwrap();
    assert_eq!(encoding.code, "xyz");
    assert_close(encoding.cost, 2.0);
    assert_eq!(encoding.text_len, 3);
}

#[test]
fn test_empty_input() {
    let costs = unit_costs();
    let trie = weather_trie(&costs);
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::NoGap, &costs));
    assert!(matches!(finder.find(""), Err(FinderError::EmptyInput)));
    assert!(matches!(finder.segment(""), Err(FinderError::EmptyInput)));
}

#[test]
fn test_deterministic() {
    let costs = unit_costs();
    let trie = weather_trie(&costs);
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::SpaceOrPunct, &costs));
    let text = "天气好，天气预报说天好";
    assert_eq!(finder.find(text).unwrap(), finder.find(text).unwrap());
}

#[test]
fn test_segments_cover_text() {
    let costs = unit_costs();
    let trie = weather_trie(&costs);
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::NoGap, &costs));
    let (encoding, segments) = finder.segment("天气预报，好").unwrap();
    assert_eq!(encoding.code, "w，h");
    let spans: Vec<(usize, usize, &str, bool)> = segments
        .iter()
        .map(|s| (s.start, s.end, s.code.as_str(), s.fallback))
        .collect();
    assert_eq!(
        spans,
        vec![(0, 4, "w", false), (4, 5, "，", true), (5, 6, "h", false)]
    );
}

#[test]
fn test_segment_matches_find() {
    let costs = unit_costs();
    let trie = weather_trie(&costs);
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::SpaceOrPunct, &costs));
    let text = "天气好天气预报好预报";
    let (encoding, segments) = finder.segment(text).unwrap();
    assert_eq!(encoding, finder.find(text).unwrap());
    assert_eq!(segments.first().map(|s| s.start), Some(0));
    assert_eq!(segments.last().map(|s| s.end), Some(encoding.text_len));
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn test_tie_keeps_first_path() {
    // "ab" as one word and "a"+"b" linked both cost 0.2
    let costs = pq_costs();
    let entries = vec![
        DictEntry::new("a", "p", 0.0),
        DictEntry::new("b", "q", 0.0),
        DictEntry::new("ab", "pq", 0.0),
    ];
    let trie = WordCodeTrie::from_entries(entries, &costs).unwrap();
    let finder = Finder::new(&trie, Linker::new(LinkStrategy::NoGap, &costs));
    let (encoding, segments) = finder.segment("ab").unwrap();
    assert_eq!(encoding.code, "pq");
    assert_eq!(segments.len(), 1);
    assert_eq!((segments[0].start, segments[0].end), (0, 2));
}
