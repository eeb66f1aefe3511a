//! Typed server settings resolved from environment keys over the TOML sections.

use std::time::Duration;

use crate::xdg_toml::ConfigFile;
use crate::LoadError;

pub const ENV_DRY_RUN: &str = "MCP_TELEPORT_DRY_RUN";
pub const ENV_DEBUG: &str = "MCP_TELEPORT_DEBUG";
pub const ENV_NON_DESTRUCTIVE: &str = "MCP_TELEPORT_NON_DESTRUCTIVE";
pub const ENV_TSH_BINARY: &str = "MCP_TELEPORT_TSH_BINARY";
pub const ENV_TIMEOUT_SECS: &str = "MCP_TELEPORT_TIMEOUT_SECS";

pub const DEFAULT_TSH_BINARY: &str = "tsh";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dry_run: bool,
    pub debug: bool,
    pub non_destructive: bool,
    pub tsh_binary: String,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dry_run: false,
            debug: false,
            non_destructive: true,
            tsh_binary: DEFAULT_TSH_BINARY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// `1/true/yes/on` and `0/false/no/off`, case-insensitive.
pub fn parse_bool(key: &str, value: &str) -> Result<bool, LoadError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoadError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_timeout(key: &str, value: &str) -> Result<u64, LoadError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(LoadError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

impl Settings {
    /// Environment (via `lookup`) over `file` over defaults. Empty env values
    /// count as unset.
    pub fn resolve<F>(file: &ConfigFile, lookup: F) -> Result<Self, LoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let flag = |key: &str, fallback: Option<bool>, default: bool| -> Result<bool, LoadError> {
            match get(key) {
                Some(v) => parse_bool(key, &v),
                None => Ok(fallback.unwrap_or(default)),
            }
        };

        let defaults = Self::default();
        let timeout_secs = match get(ENV_TIMEOUT_SECS) {
            Some(v) => parse_timeout(ENV_TIMEOUT_SECS, &v)?,
            None => match file.tsh.timeout_secs {
                Some(0) => {
                    return Err(LoadError::InvalidValue {
                        key: "tsh.timeout_secs".to_string(),
                        value: "0".to_string(),
                    })
                }
                Some(secs) => secs,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };

        Ok(Self {
            dry_run: flag(ENV_DRY_RUN, file.server.dry_run, defaults.dry_run)?,
            debug: flag(ENV_DEBUG, file.server.debug, defaults.debug)?,
            non_destructive: flag(
                ENV_NON_DESTRUCTIVE,
                file.server.non_destructive,
                defaults.non_destructive,
            )?,
            tsh_binary: get(ENV_TSH_BINARY)
                .or_else(|| file.tsh.binary.clone())
                .unwrap_or(defaults.tsh_binary),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// [`resolve`](Self::resolve) against the process environment.
    pub fn from_env(file: &ConfigFile) -> Result<Self, LoadError> {
        Self::resolve(file, |key| std::env::var(key).ok())
    }
}
