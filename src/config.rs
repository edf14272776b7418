use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "autorelease.toml";

/// Represents the complete configuration for auto-release.
///
/// Every field is optional in the file; paths are resolved against the
/// directory the tool runs in.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// JSON manifest holding the `version` field.
    pub manifest: PathBuf,

    /// Changelog file that receives the rendered release section.
    pub changelog: PathBuf,

    /// Release notes file written only in CI.
    pub release_notes: PathBuf,

    /// Remote whose URL determines compare and pull request links.
    pub remote: String,

    /// Environment variable that reads `true` when running in CI.
    pub ci_env_var: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest: PathBuf::from("package.json"),
            changelog: PathBuf::from("CHANGELOG.md"),
            release_notes: PathBuf::from(".RELEASE_NOTES.md"),
            remote: "origin".to_string(),
            ci_env_var: "GITHUB_ACTIONS".to_string(),
        }
    }
}

impl Config {
    /// Whether the configured CI indicator is set to `true`.
    pub fn running_in_ci(&self) -> bool {
        std::env::var(&self.ci_env_var).is_ok_and(|value| value == "true")
    }

    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.manifest)
    }

    pub fn changelog_path(&self, root: &Path) -> PathBuf {
        root.join(&self.changelog)
    }

    pub fn release_notes_path(&self, root: &Path) -> PathBuf {
        root.join(&self.release_notes)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autorelease.toml` in the given directory
/// 3. `.autorelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match discover_config(root) {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let config_str = fs::read_to_string(&path).map_err(|e| ReleaseError::file(&path, e))?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    let local = root.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
        .filter(|path| path.exists())
}
