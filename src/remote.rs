//! Resolution of a git remote URL into the web URL of the hosted repository.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ReleaseError, Result};

static SSH_REMOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git@([^:]+):(.+)\.git$").expect("valid regex"));
static HTTPS_REPO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://([^/]+)/([^/]+)/([^/]+)$").expect("valid regex"));

/// Owner, name and browsable base URL of the hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub owner: String,
    pub name: String,
    pub url: String,
}

impl RepoInfo {
    /// Resolves a remote URL such as `git@github.com:o/r.git` or
    /// `https://github.com/o/r.git` into `https://github.com/o/r`.
    pub fn from_remote_url(remote_url: &str) -> Result<Self> {
        let url = web_url(remote_url.trim())?;

        let captures = HTTPS_REPO.captures(&url).ok_or_else(|| {
            ReleaseError::config(format!(
                "Could not parse repository owner and name from URL '{}'",
                url
            ))
        })?;

        Ok(RepoInfo {
            owner: captures[2].to_string(),
            name: captures[3].to_string(),
            url: url.clone(),
        })
    }

    /// Link comparing two refs on the hosting platform.
    pub fn compare_url(&self, from: &str, to: &str) -> String {
        format!("{}/compare/{}...{}", self.url, from, to)
    }

    /// Link to a pull request by number.
    pub fn pull_url(&self, number: &str) -> String {
        format!("{}/pull/{}", self.url, number)
    }
}

fn web_url(remote_url: &str) -> Result<String> {
    if remote_url.starts_with("git@") {
        if let Some(captures) = SSH_REMOTE.captures(remote_url) {
            return Ok(format!("https://{}/{}", &captures[1], &captures[2]));
        }
    }

    if remote_url.starts_with("https://") {
        return Ok(remote_url
            .strip_suffix(".git")
            .unwrap_or(remote_url)
            .to_string());
    }

    Err(ReleaseError::config(format!(
        "Unsupported remote URL format: '{}'",
        remote_url
    )))
}
