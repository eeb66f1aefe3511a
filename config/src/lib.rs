//! Load configuration from XDG `config.toml` and project `.env`, apply it to the process
//! environment with priority **existing env > .env > XDG**, then resolve typed [`Settings`].
//!
//! File layout (`$XDG_CONFIG_HOME/mcp-teleport/config.toml`):
//!
//! ```toml
//! [env]
//! MCP_TELEPORT_DEBUG = "true"
//!
//! [server]
//! dry_run = false
//! non_destructive = true
//!
//! [tsh]
//! binary = "/usr/local/bin/tsh"
//! timeout_secs = 30
//! ```
//!
//! Command-line flags sit above all of this and are applied by the binary.

mod dotenv_file;
mod settings;
mod xdg_toml;

use std::path::Path;
use thiserror::Error;

pub use settings::{
    parse_bool, Settings, DEFAULT_TIMEOUT_SECS, DEFAULT_TSH_BINARY, ENV_DEBUG, ENV_DRY_RUN,
    ENV_NON_DESTRUCTIVE, ENV_TIMEOUT_SECS, ENV_TSH_BINARY,
};
pub use xdg_toml::{config_path, ConfigFile, ServerSection, TshSection};

/// Application name used for the XDG directory.
pub const APP_NAME: &str = "mcp-teleport";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    Dotenv(::dotenv::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Loads XDG `config.toml` and optional project `.env`, then sets environment
/// variables only for keys that are **not** already set (so existing env has highest priority).
///
/// Order of precedence when a key is missing in the process environment:
/// 1. Value from project `.env` (current directory or `override_dir` if given)
/// 2. Value from the `[env]` table of `$XDG_CONFIG_HOME/<app_name>/config.toml`
///
/// Returns the parsed file so its typed sections can feed [`Settings`].
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<ConfigFile, LoadError> {
    let file = xdg_toml::load_config_file(app_name)?;
    let dotenv_map = dotenv_file::load_env_map(override_dir)?;

    let mut keys: std::collections::HashSet<&String> = file.env.keys().collect();
    keys.extend(dotenv_map.keys());

    for key in keys {
        if std::env::var_os(key).is_some() {
            continue; // existing env wins
        }
        if let Some(v) = dotenv_map.get(key).or_else(|| file.env.get(key)) {
            std::env::set_var(key, v);
        }
    }

    Ok(file)
}

/// [`load_and_apply`] followed by [`Settings::from_env`].
pub fn load_settings(app_name: &str, override_dir: Option<&Path>) -> Result<Settings, LoadError> {
    let file = load_and_apply(app_name, override_dir)?;
    Settings::from_env(&file)
}

#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn restore_var(key: &str, prev: Option<String>) {
        match prev {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
    }

    fn write_xdg(dir: &Path, app: &str, body: &str) {
        let app_dir = dir.join(app);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), body).unwrap();
    }

    #[test]
    fn existing_env_wins() {
        let _g = ENV_TEST_LOCK.lock().unwrap();
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dotenv_dir.path().join(".env"),
            "CONFIG_TEST_EXISTING=from_dotenv\n",
        )
        .unwrap();
        env::set_var("CONFIG_TEST_EXISTING", "from_env");
        let _ = load_and_apply("config-crate-nonexistent-app-xyz", Some(dotenv_dir.path()));
        assert_eq!(env::var("CONFIG_TEST_EXISTING").as_deref(), Ok("from_env"));
        env::remove_var("CONFIG_TEST_EXISTING");
    }

    #[test]
    fn load_and_apply_no_config_ok() {
        let _g = ENV_TEST_LOCK.lock().unwrap();
        let empty_dir = tempfile::tempdir().unwrap();
        let r = load_and_apply("config-crate-nonexistent-app-xyz", Some(empty_dir.path()));
        assert_eq!(r.unwrap(), ConfigFile::default());
    }

    #[test]
    fn dotenv_overrides_xdg() {
        let _g = ENV_TEST_LOCK.lock().unwrap();
        let xdg_dir = tempfile::tempdir().unwrap();
        write_xdg(
            xdg_dir.path(),
            APP_NAME,
            "[env]\nCONFIG_TEST_PRIORITY = \"from_xdg\"\n",
        );
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dotenv_dir.path().join(".env"),
            "CONFIG_TEST_PRIORITY=from_dotenv\n",
        )
        .unwrap();

        let prev_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", xdg_dir.path());
        env::remove_var("CONFIG_TEST_PRIORITY");

        let _ = load_and_apply(APP_NAME, Some(dotenv_dir.path()));
        let val = env::var("CONFIG_TEST_PRIORITY").unwrap();
        env::remove_var("CONFIG_TEST_PRIORITY");
        restore_var("XDG_CONFIG_HOME", prev_xdg);

        assert_eq!(val, "from_dotenv");
    }

    #[test]
    fn xdg_applied_when_no_dotenv() {
        let _g = ENV_TEST_LOCK.lock().unwrap();
        let xdg_dir = tempfile::tempdir().unwrap();
        write_xdg(
            xdg_dir.path(),
            APP_NAME,
            "[env]\nCONFIG_TEST_XDG_ONLY = \"from_xdg\"\n",
        );
        let empty_dir = tempfile::tempdir().unwrap();

        let prev_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", xdg_dir.path());
        env::remove_var("CONFIG_TEST_XDG_ONLY");

        let _ = load_and_apply(APP_NAME, Some(empty_dir.path()));
        let val = env::var("CONFIG_TEST_XDG_ONLY").unwrap();
        env::remove_var("CONFIG_TEST_XDG_ONLY");
        restore_var("XDG_CONFIG_HOME", prev_xdg);

        assert_eq!(val, "from_xdg");
    }

    #[test]
    fn settings_from_file_sections_and_dotenv() {
        let _g = ENV_TEST_LOCK.lock().unwrap();
        let xdg_dir = tempfile::tempdir().unwrap();
        write_xdg(
            xdg_dir.path(),
            APP_NAME,
            "[server]\ndry_run = true\n\n[tsh]\nbinary = \"/opt/teleport/tsh\"\ntimeout_secs = 12\n",
        );
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(dotenv_dir.path().join(".env"), "MCP_TELEPORT_DEBUG=on\n").unwrap();

        let prev_xdg = env::var("XDG_CONFIG_HOME").ok();
        let keys = [
            ENV_DRY_RUN,
            ENV_DEBUG,
            ENV_NON_DESTRUCTIVE,
            ENV_TSH_BINARY,
            ENV_TIMEOUT_SECS,
        ];
        let prev: Vec<_> = keys.iter().map(|k| env::var(k).ok()).collect();
        for k in keys {
            env::remove_var(k);
        }
        env::set_var("XDG_CONFIG_HOME", xdg_dir.path());

        let settings = load_settings(APP_NAME, Some(dotenv_dir.path()));

        for (k, p) in keys.iter().zip(prev) {
            restore_var(k, p);
        }
        restore_var("XDG_CONFIG_HOME", prev_xdg);

        let settings = settings.unwrap();
        assert!(settings.dry_run);
        assert!(settings.debug);
        assert!(settings.non_destructive);
        assert_eq!(settings.tsh_binary, "/opt/teleport/tsh");
        assert_eq!(settings.timeout, std::time::Duration::from_secs(12));
    }

    #[test]
    fn invalid_xdg_toml_fails_with_xdg_parse_error() {
        let _g = ENV_TEST_LOCK.lock().unwrap();
        let xdg_dir = tempfile::tempdir().unwrap();
        write_xdg(xdg_dir.path(), APP_NAME, "invalid [[[\n");

        let prev_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", xdg_dir.path());

        let result = load_and_apply(APP_NAME, None::<&Path>);
        restore_var("XDG_CONFIG_HOME", prev_xdg);

        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }
}
