use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::campaign::Locale;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "red-protocol.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub campaign_dir: PathBuf,
    pub save_path: PathBuf,
    pub companion_rules: PathBuf,
    pub log_path: PathBuf,
    pub log_level: String,
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            campaign_dir: PathBuf::from("campaign"),
            save_path: PathBuf::from("save/progress.toml"),
            companion_rules: PathBuf::from("companion.toml"),
            log_path: PathBuf::from("red-protocol.log"),
            log_level: "info".to_string(),
            locale: Locale::En,
        }
    }
}

impl Config {
    /// Reads `path`, or returns defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_toml_or_default(path)
    }
}

/// Parses a TOML file into `T`, treating a missing file as `T::default()`.
pub fn read_toml_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} not found, using defaults", path.display());
            return Ok(T::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
