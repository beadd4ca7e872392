//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub search: SearchSettings,
    pub jd6: Jd6Keys,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub chunk_chars: usize,
}

/// Key classes of the Jd6 input method.
#[derive(Debug, Clone, Deserialize)]
pub struct Jd6Keys {
    shape_keys: String,
    phonetic_keys: String,
    #[serde(skip)]
    shape: HashSet<char>,
    #[serde(skip)]
    phonetic: HashSet<char>,
}

impl Jd6Keys {
    /// Build from two key strings. Fails if either is empty or they overlap.
    pub fn new(shape_keys: &str, phonetic_keys: &str) -> Result<Self, SettingsError> {
        let mut keys = Self {
            shape_keys: shape_keys.to_string(),
            phonetic_keys: phonetic_keys.to_string(),
            shape: HashSet::new(),
            phonetic: HashSet::new(),
        };
        keys.index()?;
        Ok(keys)
    }

    pub fn shape_keys(&self) -> &str {
        &self.shape_keys
    }

    pub fn phonetic_keys(&self) -> &str {
        &self.phonetic_keys
    }

    pub fn is_shape(&self, c: char) -> bool {
        self.shape.contains(&c)
    }

    pub fn is_phonetic(&self, c: char) -> bool {
        self.phonetic.contains(&c)
    }

    fn index(&mut self) -> Result<(), SettingsError> {
        if self.shape_keys.is_empty() {
            return Err(SettingsError::InvalidValue {
                field: "jd6.shape_keys".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.phonetic_keys.is_empty() {
            return Err(SettingsError::InvalidValue {
                field: "jd6.phonetic_keys".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        self.shape = self.shape_keys.chars().collect();
        self.phonetic = self.phonetic_keys.chars().collect();
        if let Some(c) = self.shape.intersection(&self.phonetic).next() {
            return Err(SettingsError::InvalidValue {
                field: "jd6".to_string(),
                reason: format!("key '{c}' is both a shape and a phonetic key"),
            });
        }
        Ok(())
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.jd6.index()?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.search.chunk_chars == 0 {
        return Err(SettingsError::InvalidValue {
            field: "search.chunk_chars".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}
