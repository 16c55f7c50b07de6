//! Configuration
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. --config FILE
//! 3. Project-level (./abc.toml)
//! 4. User-level (~/.config/abc/config.toml)
//! 5. Default values
//! ```
//!
//! # Example
//!
//! ```toml
//! [reduce]
//! quota = 5000
//! trace = false
//!
//! [shell]
//! prompt = "abc> "
//! history_file = "/home/me/.abc_history"
//!
//! [reader]
//! root = "/home/me/abc/lib"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::backends::ShellConfig;
use crate::vm::ReduceConfig;

/// Name of the project-level configuration file.
pub const PROJECT_FILE: &str = "abc.toml";

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Reduction settings
    #[serde(default)]
    pub reduce: ReduceConfig,
    /// Shell settings
    #[serde(default)]
    pub shell: ShellConfig,
    /// Name resolution settings
    #[serde(default)]
    pub reader: ReaderConfig,
}

/// Name resolution settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReaderConfig {
    /// Directory holding one file per name. Defaults to the working directory.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl Config {
    /// Parse TOML text.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Directory names are resolved against.
    pub fn resolver_root(&self) -> PathBuf {
        match &self.reader.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// Result of loading configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("abc"));
    }

    // Fallback to ~/.config/abc
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("abc"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("abc"));
    }

    None
}

/// Get the user config file path (~/.config/abc/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Candidate files in priority order, for a process running in `cwd`.
pub fn search_paths(cwd: &Path) -> Vec<PathBuf> {
    let mut paths = vec![cwd.join(PROJECT_FILE)];
    paths.extend(get_config_path());
    paths
}

/// Load configuration from one file.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded configuration");
    Config::from_toml(&content)
}

/// Load the first configuration found among `paths`, or defaults.
pub fn load_first(paths: &[PathBuf]) -> ConfigResult<Config> {
    match paths.iter().find(|path| path.is_file()) {
        Some(path) => load_file(path),
        None => Ok(Config::default()),
    }
}

/// Load configuration. An explicit file must exist; otherwise the project
/// file and then the user file are tried.
pub fn load_config(explicit: Option<&Path>) -> ConfigResult<Config> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        return load_file(path);
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    load_first(&search_paths(&cwd))
}
