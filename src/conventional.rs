use std::sync::LazyLock;

use regex::Regex;

pub use crate::version::VersionBump;

static COMMIT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(?:\(([^)]+)\))?:\s*(.+)$").expect("valid regex"));
static FEAT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^feat(\([^)]+\))?:").expect("valid regex"));
static FIX_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fix(\([^)]+\))?:").expect("valid regex"));

const BREAKING_MARKERS: [&str; 2] = ["BREAKING CHANGE", "BREAKING CHANGES"];

/// A commit header decomposed as `type(scope): subject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub subject: String,
}

/// Parses the first line of a commit message.
///
/// Returns `None` for messages that don't follow the conventional grammar;
/// callers drop those silently. The type tag is kept verbatim, so `Feat: x`
/// parses with type `Feat`, which the changelog catalog does not recognise.
pub fn parse_conventional_commit(message: &str) -> Option<ConventionalCommit> {
    let header = message.lines().next()?.trim_end();
    let captures = COMMIT_HEADER.captures(header)?;

    Some(ConventionalCommit {
        r#type: captures.get(1)?.as_str().to_string(),
        scope: captures.get(2).map(|m| m.as_str().to_string()),
        subject: captures.get(3)?.as_str().to_string(),
    })
}

/// Parses every message, keeping only the conventional ones in input order.
pub fn parse_commits<S: AsRef<str>>(messages: &[S]) -> Vec<ConventionalCommit> {
    messages
        .iter()
        .filter_map(|message| parse_conventional_commit(message.as_ref()))
        .collect()
}

/// Determines the bump implied by a set of full commit messages.
///
/// Each message is split into blank-line separated paragraphs. Precedence is
/// evaluated over the whole set: any `BREAKING CHANGE` marker means major,
/// otherwise any paragraph opening with `feat:`/`feat(scope):` means minor,
/// otherwise any opening with `fix:`/`fix(scope):` means patch.
/// `None` means there is nothing worth releasing.
pub fn determine_version_bump<S: AsRef<str>>(commit_messages: &[S]) -> Option<VersionBump> {
    if commit_messages.is_empty() {
        return None;
    }

    let paragraphs: Vec<&str> = commit_messages
        .iter()
        .flat_map(|message| message.as_ref().split("\n\n"))
        .collect();

    if paragraphs
        .iter()
        .any(|p| BREAKING_MARKERS.iter().any(|marker| p.contains(marker)))
    {
        return Some(VersionBump::Major);
    }

    if paragraphs.iter().any(|p| FEAT_PREFIX.is_match(p)) {
        return Some(VersionBump::Minor);
    }

    if paragraphs.iter().any(|p| FIX_PREFIX.is_match(p)) {
        return Some(VersionBump::Patch);
    }

    None
}
