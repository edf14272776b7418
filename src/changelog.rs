//! Changelog generation and merging.
//!
//! Commits are grouped by their conventional type, rendered as a markdown
//! section for one release, and merged on top of an existing `CHANGELOG.md`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::conventional::ConventionalCommit;
use crate::remote::RepoInfo;

/// Title line every generated changelog starts with.
pub const CHANGELOG_TITLE: &str = "## Changelog\n";

const NO_CHANGES_BULLET: &str =
    "- No significant changes (initial release or maintenance update).";

/// Commit types that appear in the changelog, in section order.
pub const TYPE_CATALOG: [(&str, &str); 2] = [("feat", "Features"), ("fix", "Bug Fixes")];

static PULL_REQUEST_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#(\d+)\)|#(\d+)").expect("valid regex"));
static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^## Changelog\n+").expect("valid regex"));
static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s.*\n+").expect("valid regex"));

/// Heading data for one release section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub version: String,
    pub date: NaiveDate,
    pub compare_url: Option<String>,
}

impl ReleaseInfo {
    /// Builds release info for `version`, linking from `last_tag` when present.
    ///
    /// The new tag mirrors the last tag's `v` prefix convention.
    pub fn new(version: &str, date: NaiveDate, last_tag: Option<&str>, repo: &RepoInfo) -> Self {
        let version = version.strip_prefix('v').unwrap_or(version).to_string();
        let compare_url = last_tag.map(|tag| {
            let new_tag = if tag.starts_with('v') {
                format!("v{}", version)
            } else {
                version.clone()
            };
            repo.compare_url(tag, &new_tag)
        });

        ReleaseInfo {
            version,
            date,
            compare_url,
        }
    }

    fn heading(&self) -> String {
        let date = self.date.format("%Y-%m-%d");
        match &self.compare_url {
            Some(url) => format!("### [{}]({}) ({})", self.version, url, date),
            None => format!("### {} ({})", self.version, date),
        }
    }
}

/// Subjects bucketed by commit type, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCommits {
    buckets: Vec<(&'static str, Vec<String>)>,
}

impl GroupedCommits {
    /// Groups commits into the catalog's buckets, dropping unknown types.
    pub fn from_commits(commits: &[ConventionalCommit]) -> Self {
        let buckets = TYPE_CATALOG
            .iter()
            .map(|(ty, _)| {
                let subjects = commits
                    .iter()
                    .filter(|c| c.r#type == *ty && !c.subject.is_empty())
                    .map(|c| c.subject.clone())
                    .collect();
                (*ty, subjects)
            })
            .collect();

        GroupedCommits { buckets }
    }

    /// Subjects recorded for a commit type.
    pub fn subjects(&self, commit_type: &str) -> &[String] {
        self.buckets
            .iter()
            .find(|(ty, _)| *ty == commit_type)
            .map(|(_, subjects)| subjects.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|(_, subjects)| subjects.is_empty())
    }
}

/// A rendered release section.
///
/// `full` is what gets merged into the changelog file; `release_notes` is the
/// same text without the title and version heading, for a release description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    pub full: String,
    pub release_notes: String,
}

/// Renders the markdown section for one release.
pub fn render(release: &ReleaseInfo, grouped: &GroupedCommits, repo: &RepoInfo) -> Changelog {
    let mut content = String::from(CHANGELOG_TITLE);
    content.push('\n');
    content.push_str(&release.heading());
    content.push('\n');

    if grouped.is_empty() {
        content.push('\n');
        content.push_str(NO_CHANGES_BULLET);
        content.push('\n');
        return Changelog {
            release_notes: content.clone(),
            full: content,
        };
    }

    for (ty, title) in TYPE_CATALOG {
        let subjects = grouped.subjects(ty);
        if subjects.is_empty() {
            continue;
        }

        content.push_str(&format!("\n#### {}\n\n", title));
        for subject in subjects {
            content.push_str("- ");
            content.push_str(&link_pull_requests(subject, repo));
            content.push('\n');
        }
    }

    let release_notes = release_notes_excerpt(&content);
    Changelog {
        full: content,
        release_notes,
    }
}

/// Rewrites `(#12)` and bare `#12` into links to the pull request.
pub fn link_pull_requests(subject: &str, repo: &RepoInfo) -> String {
    PULL_REQUEST_REF
        .replace_all(subject, |caps: &Captures| {
            let number = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            format!("([#{}]({}))", number, repo.pull_url(number))
        })
        .into_owned()
}

/// Strips the title line and the version heading from a rendered section.
pub fn release_notes_excerpt(full: &str) -> String {
    let without_title = TITLE_LINE.replace(full, "");
    VERSION_LINE.replace(&without_title, "").into_owned()
}

/// Merges a new section into the existing changelog text.
///
/// The new section begins with the title line, so it takes the place of the
/// old title and lands above all previous releases. A file without the
/// title gets the section prepended.
pub fn merge(existing: Option<&str>, section: &str) -> String {
    match existing {
        None => section.to_string(),
        Some(existing) if existing.contains(CHANGELOG_TITLE) => {
            existing.replacen(CHANGELOG_TITLE, section, 1)
        }
        Some(existing) => format!("{}{}", section, existing),
    }
}
