use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for auto-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git command failed: {0}")]
    Vcs(String),

    #[error("Versioning policy violation: {0}")]
    VersioningPolicy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest is not valid JSON: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Config file is not valid TOML: {0}")]
    ConfigFile(#[from] toml::de::Error),
}

/// Convenience type alias for Results in auto-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version-control error with context
    pub fn vcs(msg: impl Into<String>) -> Self {
        ReleaseError::Vcs(msg.into())
    }

    /// Create a versioning policy error with context
    pub fn policy(msg: impl Into<String>) -> Self {
        ReleaseError::VersioningPolicy(msg.into())
    }

    /// Attach the path that failed to an I/O error
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReleaseError::File {
            path: path.into(),
            source,
        }
    }
}
