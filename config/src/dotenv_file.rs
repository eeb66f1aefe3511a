//! Read a project `.env` into a key-value map (applying happens in lib).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `.env` in `override_dir` if given, else in the current directory.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Parses with the `dotenv` crate without touching the process environment.
/// Missing file returns an empty map.
pub fn load_env_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    let iter = dotenv::from_path_iter(&path).map_err(LoadError::Dotenv)?;
    iter.map(|item| item.map_err(LoadError::Dotenv)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn reads_pairs_comments_and_quotes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "# teleport\nMCP_TELEPORT_DRY_RUN=true\nMCP_TELEPORT_TSH_BINARY=\"/opt/tsh\"\n",
        )
        .unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("MCP_TELEPORT_DRY_RUN"), Some(&"true".to_string()));
        assert_eq!(m.get("MCP_TELEPORT_TSH_BINARY"), Some(&"/opt/tsh".to_string()));
    }
}
