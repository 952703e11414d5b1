//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursetree/coursetree.toml`
//! 3. Environment variables: `COURSETREE_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_path, DEFAULT_DELIMITER};

/// Unified configuration for coursetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Field separator in catalog files (default: ',')
    pub delimiter: char,
    /// Catalog loaded before the first menu prompt
    pub default_file: Option<PathBuf>,
    /// Colored terminal output (default: true)
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            default_file: None,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub delimiter: Option<char>,
    pub default_file: Option<PathBuf>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for coursetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coursetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coursetree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings from defaults, the global config file and `COURSETREE_*`
    /// environment variables.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings with an explicit config file instead of the XDG location.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
            default_file: overlay
                .default_file
                .clone()
                .or_else(|| self.default_file.clone()),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Apply COURSETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("COURSETREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = parse_delimiter(&val)?;
        }
        if let Ok(val) = config.get_string("default_file") {
            settings.default_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Expand `~` and `$VAR` in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(file) = &self.default_file {
            self.default_file = Some(PathBuf::from(expand_path(&file.to_string_lossy())));
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(ApplicationError::Config {
                message: "delimiter cannot be a line break".to_string(),
            });
        }
        Ok(())
    }

    /// Render as TOML for the `config` command.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

/// Parse a delimiter given as text; exactly one character is accepted.
pub fn parse_delimiter(value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("delimiter must be a single character, got {:?}", value),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
