use std::io;
use std::path::{Path, PathBuf};

use super::Config;
use crate::{Error, Result};

/// Overrides the config directory (used by tests and portable installs).
const CONFIG_DIR_ENV: &str = "CENTERWIN_CONFIG_DIR";

/// Returns the config directory: `~/.config/centerwin/`.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::home_dir().map(|h| h.join(".config").join("centerwin"))
}

/// Returns the config file path: `~/.config/centerwin/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
pub fn try_load() -> Result<Config> {
    let path = config_path().ok_or("could not determine config path")?;
    try_load_from(&path)
}

/// Tries to load, parse and validate a config file at `path`.
pub fn try_load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently yields defaults; any other problem is logged
/// and also yields defaults.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!("could not determine config path; using default settings");
            Config::default()
        }
    }
}

/// Like [`load`], for an explicit path.
pub fn load_from(path: &Path) -> Config {
    load_or_default(try_load_from(path))
}

/// Writes the config to `config.toml`, creating the directory if needed.
pub fn save(config: &Config) -> Result<PathBuf> {
    let path = config_path().ok_or("could not determine config path")?;
    save_to(config, &path)?;
    Ok(path)
}

/// Writes the config to `path`, creating parent directories if needed.
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    std::fs::write(path, content)?;
    Ok(())
}

fn load_or_default(result: Result<Config>) -> Config {
    match result {
        Ok(config) => config,
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Config::default(),
        Err(e) => {
            tracing::warn!("{e}; using default settings");
            Config::default()
        }
    }
}
