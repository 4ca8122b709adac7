//! Configuration for tix
//!
//! Optional tix.toml in the working directory. Everything has a default, so
//! the file is never required.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ticket::{DEFAULT_STATUS, DEFAULT_TYPE};

/// Default config filename, looked up in the working directory.
pub const CONFIG_FILE: &str = "tix.toml";

/// tix configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tickets directory. Overridden by --dir / TICKETS_DIR.
    pub tickets_dir: PathBuf,

    /// Type applied when create input omits `type`.
    pub default_type: String,

    /// Status applied when create input omits `status`.
    pub default_status: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tickets_dir: PathBuf::from("./docs/tickets"),
            default_type: DEFAULT_TYPE.to_string(),
            default_status: DEFAULT_STATUS.to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file, falling back to defaults if absent.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| crate::Error::Other(format!("Invalid config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/tix.toml")).unwrap();
        assert_eq!(config.tickets_dir, PathBuf::from("./docs/tickets"));
        assert_eq!(config.default_type, "Feature");
        assert_eq!(config.default_status, "Backlog");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "tickets_dir = \"/tmp/tickets\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.tickets_dir, PathBuf::from("/tmp/tickets"));
        assert_eq!(config.default_type, "Feature");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "tickets_dir = [not toml").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
