//! Constants and the persisted front-end settings

use crate::parser::ast::Address;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of memory cells seeded with 0 at startup (addresses `0..MEMORY_SIZE`)
pub const MEMORY_SIZE: Address = 1024;

/// Default path of the persisted memory store
pub const MEMORY_FILE: &str = "memory.json";

/// Default path of the persisted menu settings
pub const SETTINGS_FILE: &str = "menu.json";

/// In set mode, names starting with this letter (any case) are registers
pub const REGISTER_PREFIX: char = 'R';

/// Extension of program files offered by the file picker
pub const PROGRAM_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings {path} are not valid: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Main-menu settings, remembered across launches when `save` is on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Program selected in the file picker
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Run with the debugger attached
    #[serde(default)]
    pub debug: bool,
    /// Write these settings back when leaving the menu
    #[serde(default = "default_save")]
    pub save: bool,
}

fn default_save() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            file: None,
            debug: false,
            save: default_save(),
        }
    }
}

impl Settings {
    /// Read settings, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("menu.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.save);
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        let settings = Settings {
            file: Some(PathBuf::from("count.txt")),
            debug: true,
            save: true,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        fs::write(&path, r#"{ "debug": true }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert!(settings.debug);
        assert!(settings.save);
        assert_eq!(settings.file, None);
    }
}
