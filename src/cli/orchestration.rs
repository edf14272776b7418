//! Release workflow orchestration
//!
//! The three workflows run by the binary: bumping the manifest version,
//! rewriting the changelog and creating the release commit and tag.
//! Each one takes its collaborators as arguments, reports progress through
//! the [Reporter] and returns a typed outcome; the binary maps outcomes and
//! errors to exit codes.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::changelog::{self, GroupedCommits, ReleaseInfo};
use crate::config::Config;
use crate::conventional;
use crate::error::{ReleaseError, Result};
use crate::git::VcsGateway;
use crate::manifest::Manifest;
use crate::remote::RepoInfo;
use crate::ui::{self, Confirm, Reporter};
use crate::version::Version;

/// Inputs shared by every workflow.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowContext<'a> {
    /// Directory the configured paths are relative to
    pub root: &'a Path,
    pub config: &'a Config,
    pub reporter: &'a Reporter,
    /// Report intended changes instead of writing anything
    pub dry_run: bool,
}

/// Result of the version bump workflow
#[derive(Debug, Clone, PartialEq)]
pub enum VersionOutcome {
    /// The manifest now holds the new version
    Bumped { from: String, to: Version },
    /// Dry run: the version the manifest would have received
    WouldBump { from: String, to: Version },
    /// Nothing to do; not an error
    Skipped(BoundaryWarning),
}

/// Result of the changelog workflow
#[derive(Debug, Clone, PartialEq)]
pub enum ChangelogOutcome {
    /// The changelog was written; `release_notes` is the side file, if written
    Written {
        changelog: PathBuf,
        release_notes: Option<PathBuf>,
    },
    /// Dry run: the content that would have been written
    Previewed {
        changelog: String,
        release_notes: String,
    },
}

/// Result of the tag workflow
#[derive(Debug, Clone, PartialEq)]
pub enum TagOutcome {
    Created { tag: String },
    /// The user did not confirm; the repository is untouched
    Declined,
    /// Dry run: the tag that would have been created
    Previewed { tag: String },
}

/// Bumps the manifest version according to the commits since the last tag.
///
/// 1. Read the current version from the manifest
/// 2. Skip when the repository has no tags yet
/// 3. Classify the commits since the latest tag
/// 4. Skip when no commit calls for a release
/// 5. Write the incremented version (or report it under dry run)
pub fn run_version_workflow<G: VcsGateway>(
    ctx: &WorkflowContext<'_>,
    git: &G,
) -> Result<VersionOutcome> {
    let mut manifest = Manifest::load(ctx.config.manifest_path(ctx.root))?;
    let current = manifest.version()?.to_string();

    if git.list_tags()?.is_empty() {
        let warning = BoundaryWarning::NoTags;
        ctx.reporter.boundary(&warning);
        return Ok(VersionOutcome::Skipped(warning));
    }

    let latest_tag = git.latest_tag()?;
    let messages = git.commit_messages(latest_tag.as_deref())?;
    debug!(count = messages.len(), tag = ?latest_tag, "classifying commits");

    let Some(bump) = conventional::determine_version_bump(&messages) else {
        let warning = BoundaryWarning::NoReleasableCommits { latest_tag };
        ctx.reporter.boundary(&warning);
        return Ok(VersionOutcome::Skipped(warning));
    };

    let next = Version::parse(&current).bump(bump)?;

    if ctx.dry_run {
        ctx.reporter.info(&format!(
            "Version would be updated from {} to v{} ({} bump)",
            current, next, bump
        ));
        return Ok(VersionOutcome::WouldBump {
            from: current,
            to: next,
        });
    }

    manifest.set_version(&next.to_string());
    manifest.save()?;
    ctx.reporter
        .success(&format!("Successfully updated version to v{}", next));

    Ok(VersionOutcome::Bumped {
        from: current,
        to: next,
    })
}

/// Rewrites the changelog with a section for the manifest version.
///
/// 1. Resolve the repository URL from the remote
/// 2. Read the current version from the manifest
/// 3. Find the latest tag; without one this is the initial changelog
/// 4. Refuse to continue unless the version is newer than that tag
/// 5. Render the commits since the tag and merge into the changelog
/// 6. In CI, also write the release notes file
pub fn run_changelog_workflow<G: VcsGateway>(
    ctx: &WorkflowContext<'_>,
    git: &G,
    today: NaiveDate,
    in_ci: bool,
) -> Result<ChangelogOutcome> {
    ctx.reporter.info("Starting changelog update process...");

    let repo = RepoInfo::from_remote_url(&git.remote_url(&ctx.config.remote)?)?;
    debug!(owner = %repo.owner, name = %repo.name, "resolved repository");
    let manifest = Manifest::load(ctx.config.manifest_path(ctx.root))?;
    let version = manifest.version()?;

    let last_tag = git.list_tags()?.into_iter().next();
    match last_tag.as_deref() {
        Some(tag) => ensure_version_is_newer(version, tag)?,
        None => ctx.reporter.boundary(&BoundaryWarning::InitialChangelog),
    }

    let release = ReleaseInfo::new(version, today, last_tag.as_deref(), &repo);
    let messages = git.commit_messages(last_tag.as_deref())?;
    let commits = conventional::parse_commits(&messages);
    let grouped = GroupedCommits::from_commits(&commits);
    let rendered = changelog::render(&release, &grouped, &repo);

    let changelog_path = ctx.config.changelog_path(ctx.root);
    let existing = read_optional(&changelog_path)?;
    let content = changelog::merge(existing.as_deref(), &rendered.full);

    if ctx.dry_run {
        ctx.reporter.info(&format!(
            "Dry run: Changelog would be updated with:\n{}",
            content
        ));
        ctx.reporter.info(&format!(
            "Dry run: releaseNotes would be updated with:\n{}",
            rendered.release_notes
        ));
        return Ok(ChangelogOutcome::Previewed {
            changelog: content,
            release_notes: rendered.release_notes,
        });
    }

    write_file(&changelog_path, &content)?;

    let release_notes = if in_ci {
        let path = ctx.config.release_notes_path(ctx.root);
        write_file(&path, &rendered.release_notes)?;
        Some(path)
    } else {
        ctx.reporter.info(&format!(
            "Skipping {} generation in local environment...",
            ctx.config.release_notes.display()
        ));
        None
    };

    ctx.reporter.success(&format!(
        "Successfully updated {}",
        ctx.config.changelog.display()
    ));

    Ok(ChangelogOutcome::Written {
        changelog: changelog_path,
        release_notes,
    })
}

/// Stages everything, commits and tags the manifest version after confirmation.
pub fn run_tag_workflow<G: VcsGateway, C: Confirm>(
    ctx: &WorkflowContext<'_>,
    git: &G,
    confirm: &C,
) -> Result<TagOutcome> {
    let manifest = Manifest::load(ctx.config.manifest_path(ctx.root))?;
    let version = manifest.version()?;
    let tag = format!("v{}", version);
    let commit_message = format!("chore: release v{}", version);
    let tag_message = format!("release v{}", version);

    if ctx.dry_run {
        ctx.reporter.info(&format!(
            "Dry run: would commit \"{}\" and create tag {}",
            commit_message, tag
        ));
        return Ok(TagOutcome::Previewed { tag });
    }

    if !confirm.confirm(&ui::tag_prompt(version))? {
        ctx.reporter
            .info("Aborted git tag creation, nothing changed.");
        return Ok(TagOutcome::Declined);
    }

    git.stage_all()?;
    git.commit(&commit_message)?;
    ctx.reporter.success(&format!(
        "Git committed with message: \"{}\"",
        commit_message
    ));

    git.tag(&tag, &tag_message)?;
    ctx.reporter.success(&format!("Git tag created: {}", tag));

    Ok(TagOutcome::Created { tag })
}

/// Fails unless `version` sorts strictly after `last_tag`.
pub fn ensure_version_is_newer(version: &str, last_tag: &str) -> Result<()> {
    if Version::parse(version).is_strictly_greater(&Version::parse(last_tag)) {
        Ok(())
    } else {
        Err(ReleaseError::policy(format!(
            "Version \"{}\" is not greater than last tag \"{}\"",
            version, last_tag
        )))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ReleaseError::file(path, e)),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    debug!(path = %path.display(), bytes = content.len(), "writing file");
    fs::write(path, content).map_err(|e| ReleaseError::file(path, e))
}
