//! JSON project manifest (`package.json`) holding the project version.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::error::{ReleaseError, Result};

/// A loaded manifest document.
///
/// The whole document is kept so that rewriting the version leaves every
/// other field, and the key order, untouched.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Value,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|e| ReleaseError::file(&path, e))?;
        let document: Value = serde_json::from_str(&content)?;

        if !document.is_object() {
            return Err(ReleaseError::config(format!(
                "{} must contain a JSON object",
                path.display()
            )));
        }

        Ok(Manifest { path, document })
    }

    /// The `version` field; missing or empty is a configuration error.
    pub fn version(&self) -> Result<&str> {
        self.document
            .get("version")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ReleaseError::config(format!(
                    "Missing \"version\" field in {}",
                    self.file_name()
                ))
            })
    }

    pub fn set_version(&mut self, version: &str) {
        if let Value::Object(fields) = &mut self.document {
            fields.insert("version".to_string(), Value::String(version.to_string()));
        }
    }

    /// Pretty-printed JSON with two-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.document)?;
        content.push('\n');
        Ok(content)
    }

    /// Writes the document back to where it was loaded from.
    pub fn save(&self) -> Result<()> {
        let content = self.to_json_string()?;
        debug!(path = %self.path.display(), "writing manifest");
        fs::write(&self.path, content).map_err(|e| ReleaseError::file(&self.path, e))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
