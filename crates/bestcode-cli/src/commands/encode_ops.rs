use std::path::Path;
use std::process;

use bestcode_core::cost::KeyCosts;
use bestcode_core::dict::WordCodeTrie;
use bestcode_core::finder::Finder;
use bestcode_core::linker::{LinkStrategy, Linker};

pub fn encode_cmd(dict_file: &str, costs_file: &str, strat: &str, text: &str) {
    let strategy: LinkStrategy = die!(strat.parse(), "Error: {}");
    let costs = die!(
        KeyCosts::open(Path::new(costs_file)),
        "Error opening key costs: {}"
    );
    let trie = die!(
        WordCodeTrie::open(Path::new(dict_file), &costs),
        "Error opening dictionary: {}"
    );
    let finder = Finder::new(&trie, Linker::new(strategy, &costs));
    let (encoding, segments) = die!(finder.segment(text), "Error: {}");

    let chars: Vec<char> = text.chars().collect();
    for s in &segments {
        let word: String = chars[s.start..s.end].iter().collect();
        let marker = if s.fallback { "  (not in dictionary)" } else { "" };
        println!("{word}\t{}{marker}", s.code);
    }
    println!("code: {}", encoding.code);
    println!("cost: {:.4}", encoding.cost);
    let missing = costs.missing_count();
    if missing > 0 {
        println!("missing pairs: {missing}");
    }
}

pub fn cost_cmd(costs_file: &str, code: &str) {
    let costs = die!(
        KeyCosts::open(Path::new(costs_file)),
        "Error opening key costs: {}"
    );
    let cost = die!(costs.code_cost(code), "Error: {}");
    println!("{code}\t{cost:.4}");
    for (c1, c2) in costs.missing() {
        println!("  missing: {c1}{c2} (charged the mean {:.4})", costs.mean());
    }
}

pub fn lookup_cmd(dict_file: &str, costs_file: &str, word: &str) {
    let costs = die!(
        KeyCosts::open(Path::new(costs_file)),
        "Error opening key costs: {}"
    );
    let trie = die!(
        WordCodeTrie::open(Path::new(dict_file), &costs),
        "Error opening dictionary: {}"
    );
    match trie.lookup(word) {
        Some(cc) => println!("{word}\t{}\t{:.4}", cc.code, cc.cost),
        None => println!("{word}: not found"),
    }
}
