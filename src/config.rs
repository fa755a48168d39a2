//! Tool configuration module.
//!
//! Handles loading and validating `seqshot.toml`. Everything is optional —
//! a missing file means stock defaults — and unknown keys are rejected to
//! catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_dir = "output"       # Where saved images land
//! default_prefix = "seqshot"  # Used when --prefix is empty/whitespace
//!
//! # Named folders for `seqshot open <key>`. Keys are yours to choose;
//! # values are absolute paths.
//! [folders]
//! # checkpoints = "/data/models/checkpoints"
//! # loras = "/data/models/loras"
//! # outputs = "/data/output"
//! ```
//!
//! The folder map exists so frequently-visited directories (model stores,
//! output trees, log locations) are named in one user-owned place instead
//! of being compiled in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Stock filename prefix when neither the caller nor the config supplies one.
pub const DEFAULT_PREFIX: &str = "seqshot";

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

/// Tool configuration loaded from `seqshot.toml`.
///
/// All fields have defaults; user files only specify overrides. Unknown
/// keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory saved images are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Fallback filename prefix for empty/whitespace prefixes.
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    /// Named folders for the `open` command.
    pub folders: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_prefix: default_prefix(),
            folders: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise return stock defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_prefix must not be empty".into(),
            ));
        }
        if self.default_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "default_prefix must not contain path separators".into(),
            ));
        }
        for (key, value) in &self.folders {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "folders.{key} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Look up a named folder.
    pub fn folder(&self, key: &str) -> Option<&str> {
        self.folders.get(key).map(String::as_str)
    }

    /// All configured folder keys, sorted.
    pub fn folder_keys(&self) -> Vec<&str> {
        self.folders.keys().map(String::as_str).collect()
    }
}

/// A documented stock config, printed by `seqshot gen-config`.
pub fn stock_toml() -> String {
    r#"# seqshot configuration
# All options are optional - defaults shown below.

# Where saved images (and their sidecar documents) land.
output_dir = "output"

# Filename prefix used when the save is given an empty or
# whitespace-only prefix.
default_prefix = "seqshot"

# Named folders for `seqshot open <key>`. Keys are yours to choose;
# values are absolute paths.
[folders]
# checkpoints = "/data/models/checkpoints"
# loras = "/data/models/loras"
# embeddings = "/data/models/embeddings"
# workflows = "/data/workflows"
# outputs = "/data/output"
# logs = "/var/log/seqshot"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("seqshot.toml");
        fs::write(&path, content).unwrap();
        path
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn empty_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.output_dir, "output");
        assert_eq!(config.default_prefix, DEFAULT_PREFIX);
        assert!(config.folders.is_empty());
    }

    #[test]
    fn partial_override() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "default_prefix = \"render\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_prefix, "render");
        assert_eq!(config.output_dir, "output");
    }

    #[test]
    fn folders_load_into_map() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[folders]\nloras = \"/data/loras\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.folder("loras"), Some("/data/loras"));
        assert_eq!(config.folder("missing"), None);
        assert_eq!(config.folder_keys(), vec!["loras"]);
    }

    #[test]
    fn unknown_keys_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "output_dri = \"typo\"\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.output_dir, "output");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn blank_prefix_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "default_prefix = \"  \"\n");
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn prefix_with_separator_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "default_prefix = \"a/b\"\n");
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn empty_folder_value_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[folders]\nloras = \"\"\n");
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_toml_parses_to_defaults() {
        let config: Config = toml::from_str(&stock_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.output_dir, Config::default().output_dir);
        assert_eq!(config.default_prefix, Config::default().default_prefix);
    }
}
