//! Load `$XDG_CONFIG_HOME/<app>/config.toml`: the `[env]` table plus typed
//! `[server]` and `[tsh]` sections.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::LoadError;

/// `XDG_CONFIG_HOME` when set, else the platform config dir.
fn config_home() -> Result<PathBuf, LoadError> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => dirs::config_dir()
            .ok_or_else(|| LoadError::XdgPath("no config directory for this user".to_string())),
    }
}

pub fn config_path(app_name: &str) -> Result<PathBuf, LoadError> {
    Ok(config_home()?.join(app_name).join("config.toml"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    pub dry_run: Option<bool>,
    pub debug: Option<bool>,
    pub non_destructive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TshSection {
    pub binary: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Parsed `config.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub tsh: TshSection,
}

/// Missing file returns the default (empty) config.
pub fn load_config_file(app_name: &str) -> Result<ConfigFile, LoadError> {
    let path = config_path(app_name)?;
    if !path.is_file() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    Ok(toml::from_str(&content)?)
}
