use std::fs;
use std::process;

pub fn settings_export() {
    print!("{}", bestcode_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        bestcode_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: search.chunk_chars={}, jd6.shape_keys={}, jd6.phonetic_keys={}",
        s.search.chunk_chars,
        s.jd6.shape_keys().chars().count(),
        s.jd6.phonetic_keys().chars().count()
    );
}
