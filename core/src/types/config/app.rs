use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper bound for the input debounce delay.
const MAX_DEBOUNCE_MS: u64 = 5_000;

/// User-facing application configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub catalogue: CatalogueConfig,
}

impl AppConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.search.debounce_ms > MAX_DEBOUNCE_MS {
            errors.push(format!("debounce_ms must be at most {MAX_DEBOUNCE_MS}"));
        }

        if self.catalogue.default_path.as_os_str().is_empty() {
            errors.push("default_path must not be empty".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            search: SearchSettings {
                debounce_ms: if self.search.debounce_ms > MAX_DEBOUNCE_MS {
                    defaults.search.debounce_ms
                } else {
                    self.search.debounce_ms
                },
                option_ordering: self.search.option_ordering,
            },
            catalogue: CatalogueConfig {
                default_path: if self.catalogue.default_path.as_os_str().is_empty() {
                    defaults.catalogue.default_path
                } else {
                    self.catalogue.default_path.clone()
                },
                cache_enabled: self.catalogue.cache_enabled,
            },
        }
    }
}

/// Search and facet presentation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Quiet period after the last input event before a search runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub option_ordering: OptionOrdering,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            option_ordering: OptionOrdering::default(),
        }
    }
}

/// How facet options are ordered in the dropdowns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionOrdering {
    /// Options with matches first, ascending by count then label; dead ends last, by label.
    #[default]
    MatchesFirst,
    /// By label only.
    Alphabetical,
    /// Descending by count, then by label.
    CountDescending,
}

impl fmt::Display for OptionOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionOrdering::MatchesFirst => write!(f, "matches_first"),
            OptionOrdering::Alphabetical => write!(f, "alphabetical"),
            OptionOrdering::CountDescending => write!(f, "count_descending"),
        }
    }
}

/// Catalogue source settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueConfig {
    /// CSV file read when the cache holds no catalogue.
    #[serde(default = "default_catalogue_path")]
    pub default_path: PathBuf,
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            default_path: default_catalogue_path(),
            cache_enabled: true,
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_catalogue_path() -> PathBuf {
    PathBuf::from("fehlerliste.csv")
}

fn default_true() -> bool {
    true
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
