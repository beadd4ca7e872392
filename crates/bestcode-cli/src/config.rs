//! Run configuration: which files to read and write for a full encoding run.
//!
//! ```toml
//! input_path = "text.txt"
//! link_strat = "Jd6"
//! output_path = "report.txt"
//! dict_path = "dict.yaml"
//! costs_path = "costs.txt"
//! layout_path = "layout.toml"
//! # settings_path = "settings.toml"
//! ```
//!
//! Relative paths are taken relative to the directory of the config file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use bestcode_core::linker::{LinkStrategy, UnknownStrategy};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Strategy(#[from] UnknownStrategy),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRunConfig {
    input_path: PathBuf,
    link_strat: String,
    output_path: PathBuf,
    dict_path: PathBuf,
    costs_path: PathBuf,
    layout_path: PathBuf,
    settings_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub strategy: LinkStrategy,
    /// Overwritten if it exists.
    pub output_path: PathBuf,
    pub dict_path: PathBuf,
    pub costs_path: PathBuf,
    pub layout_path: PathBuf,
    /// Engine settings replacing the built-in defaults.
    pub settings_path: Option<PathBuf>,
}

impl RunConfig {
    /// Parse a config, resolving relative paths against `base_dir`.
    pub fn from_toml(toml_str: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let raw: RawRunConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let strategy = raw.link_strat.parse()?;
        let resolve = |p: PathBuf| base_dir.join(p);
        Ok(Self {
            input_path: resolve(raw.input_path),
            strategy,
            output_path: resolve(raw.output_path),
            dict_path: resolve(raw.dict_path),
            costs_path: resolve(raw.costs_path),
            layout_path: resolve(raw.layout_path),
            settings_path: raw.settings_path.map(resolve),
        })
    }

    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml(&content, base_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
input_path = "in.txt"
link_strat = "SpaceOrPunct"
output_path = "/tmp/out.txt"
dict_path = "dicts/main.dict.yaml"
costs_path = "costs.txt"
layout_path = "layout.toml"
"#;

    #[test]
    fn test_resolve_relative_paths() {
        let cfg = RunConfig::from_toml(CONFIG, Path::new("/work")).unwrap();
        assert_eq!(cfg.strategy, LinkStrategy::SpaceOrPunct);
        assert_eq!(cfg.input_path, Path::new("/work/in.txt"));
        assert_eq!(cfg.dict_path, Path::new("/work/dicts/main.dict.yaml"));
        // Absolute paths are kept
        assert_eq!(cfg.output_path, Path::new("/tmp/out.txt"));
        assert_eq!(cfg.settings_path, None);
    }

    #[test]
    fn test_settings_path() {
        let toml = format!("{CONFIG}settings_path = \"tuning.toml\"\n");
        let cfg = RunConfig::from_toml(&toml, Path::new("/work")).unwrap();
        assert_eq!(cfg.settings_path.as_deref(), Some(Path::new("/work/tuning.toml")));
    }

    #[test]
    fn test_unknown_strategy() {
        let toml = CONFIG.replace("SpaceOrPunct", "Fastest");
        let err = RunConfig::from_toml(&toml, Path::new("/work")).unwrap_err();
        match err {
            ConfigError::Strategy(e) => assert_eq!(e.0, "Fastest"),
            other => panic!("expected a strategy error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_field() {
        let toml = CONFIG.replace("costs_path = \"costs.txt\"\n", "");
        let err = RunConfig::from_toml(&toml, Path::new("/work")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_open_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bestcode.toml");
        fs::write(&path, CONFIG).unwrap();
        let cfg = RunConfig::open(&path).unwrap();
        assert_eq!(cfg.costs_path, dir.path().join("costs.txt"));
    }
}
