use std::path::PathBuf;
use std::process::{Command, Output};

use tracing::debug;

use crate::error::{ReleaseError, Result};
use crate::git::VcsGateway;

/// Separator emitted after each commit message by `git log`.
const RECORD_SEPARATOR: char = '\u{1e}';

/// Gateway that runs the `git` executable inside a working directory.
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Create a gateway operating on the repository containing `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        GitCli { root: root.into() }
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!(?args, root = %self.root.display(), "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| {
                ReleaseError::vcs(format!("failed to run `git {}`: {}", args.join(" "), e))
            })
    }

    /// Run git and return trimmed stdout, failing on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(exit_error(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VcsGateway for GitCli {
    fn remote_url(&self, remote: &str) -> Result<String> {
        let key = format!("remote.{}.url", remote);
        self.run(&["config", "--get", key.as_str()])
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let stdout = self.run(&["tag", "--sort=-creatordate"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        let args = ["describe", "--tags", "--abbrev=0"];
        let output = self.output(&args)?;

        if output.status.success() {
            let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
            return Ok(Some(tag).filter(|t| !t.is_empty()));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("No names found") || stderr.contains("No tags can describe") {
            debug!("no tag reachable from HEAD");
            return Ok(None);
        }

        Err(exit_error(&args, &output))
    }

    fn commit_messages(&self, since: Option<&str>) -> Result<Vec<String>> {
        let range = since.map(|tag| format!("{}..HEAD", tag));
        let mut args = vec!["log", "--reverse", "--pretty=format:%B%x1e"];
        if let Some(range) = range.as_deref() {
            args.push(range);
        }

        let stdout = self.run(&args)?;
        Ok(stdout
            .split(RECORD_SEPARATOR)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn stage_all(&self) -> Result<()> {
        self.run(&["add", "."]).map(|_| ())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    fn tag(&self, name: &str, message: &str) -> Result<()> {
        self.run(&["tag", "-a", name, "-m", message]).map(|_| ())
    }
}

fn exit_error(args: &[&str], output: &Output) -> ReleaseError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    // `git commit` reports "nothing to commit" on stdout
    let detail = if stderr.trim().is_empty() {
        stdout.trim()
    } else {
        stderr.trim()
    };

    ReleaseError::vcs(format!(
        "`git {}` exited with {}: {}",
        args.join(" "),
        output.status,
        detail
    ))
}
