use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use tracing::info;

use bestcode_core::cost::{CostError, KeyCosts};
use bestcode_core::dict::{DictError, WordCodeTrie};
use bestcode_core::finder::{Finder, FinderError};
use bestcode_core::linker::Linker;
use bestcode_core::report::{Layout, LayoutError, Report, ReportError};
use bestcode_core::settings::{self, SettingsError};

use crate::config::{ConfigError, RunConfig};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("key costs: {0}")]
    Cost(#[from] CostError),

    #[error("dictionary: {0}")]
    Dict(#[from] DictError),

    #[error("layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("search: {0}")]
    Finder(#[from] FinderError),

    #[error("report: {0}")]
    Report(#[from] ReportError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

fn io_at(path: &Path) -> impl FnOnce(io::Error) -> RunError + '_ {
    move |source| RunError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub text_len: usize,
    pub code_len: usize,
    pub cost: f64,
    pub missing_pairs: usize,
    pub output_path: PathBuf,
}

/// Load every input named by `cfg`, encode the text and write the report.
///
/// The output file is written once, after everything else succeeded.
pub fn execute(cfg: &RunConfig, json: bool) -> Result<RunSummary, RunError> {
    if let Some(path) = &cfg.settings_path {
        let content = fs::read_to_string(path).map_err(io_at(path))?;
        settings::init_custom(content)?;
        info!(path = %path.display(), "custom settings loaded");
    }

    let costs = KeyCosts::open(&cfg.costs_path)?;
    info!(pairs = costs.len(), mean = costs.mean(), "key costs loaded");
    let trie = WordCodeTrie::open(&cfg.dict_path, &costs)?;
    info!(
        nodes = trie.node_count(),
        max_word_len = trie.max_word_len(),
        "dictionary loaded"
    );
    let layout = Layout::open(&cfg.layout_path)?;

    let finder = Finder::new(&trie, Linker::new(cfg.strategy, &costs));
    let input = File::open(&cfg.input_path).map_err(io_at(&cfg.input_path))?;
    info!(strategy = %cfg.strategy, chunk_chars = finder.chunk_chars(), "encoding");
    let encoding = finder.find_reader_with(input, |read| info!(read, "encoding"))?;
    info!(
        chars = encoding.text_len,
        cost = encoding.cost,
        missing_pairs = costs.missing_count(),
        "encoding done"
    );

    let report = Report::build(&encoding, &layout)?.with_missing_pairs(costs.missing());
    let mut contents = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        report.to_lines().join("\n")
    };
    contents.push('\n');
    fs::write(&cfg.output_path, contents).map_err(io_at(&cfg.output_path))?;

    Ok(RunSummary {
        text_len: encoding.text_len,
        code_len: report.code_len,
        cost: encoding.cost,
        missing_pairs: report.missing_pairs.len(),
        output_path: cfg.output_path.clone(),
    })
}

pub fn run_cmd(config_file: &str, json: bool) {
    let cfg = die!(RunConfig::open(Path::new(config_file)), "Error: {}");
    let summary = die!(execute(&cfg, json), "Error: {}");
    println!(
        "Encoded {} chars as {} keys (cost {:.4}); report written to {}",
        summary.text_len,
        summary.code_len,
        summary.cost,
        summary.output_path.display()
    );
    if summary.missing_pairs > 0 {
        println!(
            "{} key pairs had no cost and were charged the mean",
            summary.missing_pairs
        );
    }
}
