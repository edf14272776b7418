use std::fs;
use std::io;
use std::path::Path;

use auto_release::boundary::BoundaryWarning;
use auto_release::cli::{
    run_changelog_workflow, run_tag_workflow, run_version_workflow, ChangelogOutcome, TagOutcome,
    VersionOutcome, WorkflowContext,
};
use auto_release::config::Config;
use auto_release::git::{MockGateway, Mutation};
use auto_release::ui::{Confirm, Reporter};
use auto_release::version::Version;
use auto_release::ReleaseError;
use chrono::NaiveDate;
use tempfile::TempDir;

struct Answer(bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> io::Result<bool> {
        Ok(self.0)
    }
}

struct Project {
    dir: TempDir,
    config: Config,
    reporter: Reporter,
}

impl Project {
    fn new(version: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        fs::write(
            dir.path().join("package.json"),
            format!("{{\n  \"name\": \"demo\",\n  \"version\": \"{}\"\n}}\n", version),
        )
        .expect("write manifest");

        Project {
            dir,
            config: Config::default(),
            reporter: Reporter::new(false),
        }
    }

    fn ctx(&self, dry_run: bool) -> WorkflowContext<'_> {
        WorkflowContext {
            root: self.dir.path(),
            config: &self.config,
            reporter: &self.reporter,
            dry_run,
        }
    }

    fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    fn manifest(&self) -> String {
        fs::read_to_string(self.path("package.json")).expect("read manifest")
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn released_repo() -> MockGateway {
    MockGateway::new()
        .with_remote("origin", "git@github.com:o/r.git")
        .with_commit("feat: initial")
        .with_tag("v1.1.0")
        .with_commit("feat: add login")
        .with_commit("fix(ui): button spacing")
}

fn assert_missing(path: &Path) {
    assert!(!path.exists(), "{} should not exist", path.display());
}

#[test]
fn test_version_bump_end_to_end() {
    let project = Project::new("1.2.0");
    let outcome = run_version_workflow(&project.ctx(false), &released_repo()).unwrap();

    assert_eq!(
        outcome,
        VersionOutcome::Bumped {
            from: "1.2.0".to_string(),
            to: Version::new(1, 3, 0)
        }
    );
    assert!(project.manifest().contains("\"version\": \"1.3.0\""));
    assert!(project.manifest().ends_with("}\n"));
}

#[test]
fn test_version_bump_overflow_leaves_manifest_untouched() {
    let project = Project::new("18446744073709551615.0.0");
    let before = project.manifest();
    let repo = MockGateway::new()
        .with_tag("v1.0.0")
        .with_commit("chore: drop api\n\nBREAKING CHANGE: gone");

    let err = run_version_workflow(&project.ctx(false), &repo).unwrap_err();
    assert!(matches!(err, ReleaseError::VersioningPolicy(_)));
    assert_eq!(project.manifest(), before);
}

#[test]
fn test_version_bump_major_from_footer() {
    let project = Project::new("1.2.0");
    let repo = MockGateway::new()
        .with_tag("v1.2.0")
        .with_commit("refactor: new config format\n\nBREAKING CHANGE: old files are rejected");

    let outcome = run_version_workflow(&project.ctx(false), &repo).unwrap();
    assert!(matches!(
        outcome,
        VersionOutcome::Bumped { to, .. } if to == Version::new(2, 0, 0)
    ));
}

#[test]
fn test_version_without_tags_is_noop() {
    let project = Project::new("0.1.0");
    let before = project.manifest();
    let repo = MockGateway::new().with_commit("feat: first");

    let outcome = run_version_workflow(&project.ctx(false), &repo).unwrap();
    assert_eq!(outcome, VersionOutcome::Skipped(BoundaryWarning::NoTags));
    assert_eq!(project.manifest(), before);
}

#[test]
fn test_version_without_releasable_commits_is_noop() {
    let project = Project::new("1.0.0");
    let before = project.manifest();
    let repo = MockGateway::new()
        .with_tag("v1.0.0")
        .with_commit("chore: tidy")
        .with_commit("docs: readme");

    let outcome = run_version_workflow(&project.ctx(false), &repo).unwrap();
    assert_eq!(
        outcome,
        VersionOutcome::Skipped(BoundaryWarning::NoReleasableCommits {
            latest_tag: Some("v1.0.0".to_string())
        })
    );
    assert_eq!(project.manifest(), before);
}

#[test]
fn test_version_dry_run_leaves_manifest() {
    let project = Project::new("1.2.0");
    let before = project.manifest();

    let outcome = run_version_workflow(&project.ctx(true), &released_repo()).unwrap();
    assert_eq!(
        outcome,
        VersionOutcome::WouldBump {
            from: "1.2.0".to_string(),
            to: Version::new(1, 3, 0)
        }
    );
    assert_eq!(project.manifest(), before);
}

#[test]
fn test_version_missing_field_fails() {
    let project = Project::new("1.0.0");
    fs::write(project.path("package.json"), "{\"name\": \"demo\"}").unwrap();

    let err = run_version_workflow(&project.ctx(false), &released_repo()).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_changelog_end_to_end() {
    let project = Project::new("1.3.0");
    let outcome =
        run_changelog_workflow(&project.ctx(false), &released_repo(), today(), false).unwrap();

    assert_eq!(
        outcome,
        ChangelogOutcome::Written {
            changelog: project.path("CHANGELOG.md"),
            release_notes: None
        }
    );

    let written = fs::read_to_string(project.path("CHANGELOG.md")).unwrap();
    assert!(written.starts_with("## Changelog\n"));
    assert!(written.contains(
        "### [1.3.0](https://github.com/o/r/compare/v1.1.0...v1.3.0) (2024-05-01)"
    ));
    assert!(written.contains("#### Features\n\n- add login\n"));
    assert!(written.contains("#### Bug Fixes\n\n- button spacing\n"));
    assert!(!written.contains("initial"));
    assert_missing(&project.path(".RELEASE_NOTES.md"));
}

#[test]
fn test_changelog_merges_existing_history() {
    let project = Project::new("1.3.0");
    let previous = "## Changelog\n\n### 1.1.0 (2024-01-01)\n\n- No significant changes (initial release or maintenance update).\n";
    fs::write(project.path("CHANGELOG.md"), previous).unwrap();

    run_changelog_workflow(&project.ctx(false), &released_repo(), today(), false).unwrap();

    let written = fs::read_to_string(project.path("CHANGELOG.md")).unwrap();
    assert_eq!(written.matches("## Changelog\n").count(), 1);
    let new_at = written.find("### [1.3.0]").unwrap();
    let old_at = written.find("### 1.1.0").unwrap();
    assert!(new_at < old_at);
    assert!(written.ends_with(&previous["## Changelog\n".len()..]));
}

#[test]
fn test_changelog_in_ci_writes_release_notes() {
    let project = Project::new("1.3.0");
    let outcome =
        run_changelog_workflow(&project.ctx(false), &released_repo(), today(), true).unwrap();

    let notes_path = project.path(".RELEASE_NOTES.md");
    assert_eq!(
        outcome,
        ChangelogOutcome::Written {
            changelog: project.path("CHANGELOG.md"),
            release_notes: Some(notes_path.clone())
        }
    );

    let notes = fs::read_to_string(notes_path).unwrap();
    assert!(notes.starts_with("#### Features"));
    assert!(!notes.contains("## Changelog"));
}

#[test]
fn test_changelog_dry_run_writes_nothing() {
    let project = Project::new("1.3.0");
    let outcome =
        run_changelog_workflow(&project.ctx(true), &released_repo(), today(), true).unwrap();

    match outcome {
        ChangelogOutcome::Previewed {
            changelog,
            release_notes,
        } => {
            assert!(changelog.contains("- add login"));
            assert!(release_notes.contains("- button spacing"));
        }
        other => panic!("expected preview, got {:?}", other),
    }
    assert_missing(&project.path("CHANGELOG.md"));
    assert_missing(&project.path(".RELEASE_NOTES.md"));
}

#[test]
fn test_changelog_rejects_unbumped_version() {
    let project = Project::new("1.1.0");
    let err =
        run_changelog_workflow(&project.ctx(false), &released_repo(), today(), true).unwrap_err();

    assert!(matches!(err, ReleaseError::VersioningPolicy(_)));
    assert_missing(&project.path("CHANGELOG.md"));
    assert_missing(&project.path(".RELEASE_NOTES.md"));
}

#[test]
fn test_changelog_initial_release_without_tags() {
    let project = Project::new("0.1.0");
    let repo = MockGateway::new()
        .with_remote("origin", "https://github.com/o/r.git")
        .with_commit("chore: scaffold")
        .with_commit("feat: first feature (#3)");

    run_changelog_workflow(&project.ctx(false), &repo, today(), false).unwrap();

    let written = fs::read_to_string(project.path("CHANGELOG.md")).unwrap();
    assert!(written.contains("### 0.1.0 (2024-05-01)"));
    assert!(written.contains("- first feature ([#3](https://github.com/o/r/pull/3))"));
}

#[test]
fn test_changelog_unsupported_remote_fails() {
    let project = Project::new("1.3.0");
    let repo = MockGateway::new().with_remote("origin", "/srv/git/project.git");

    let err = run_changelog_workflow(&project.ctx(false), &repo, today(), false).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_changelog_missing_remote_fails() {
    let project = Project::new("1.3.0");
    let err = run_changelog_workflow(&project.ctx(false), &MockGateway::new(), today(), false)
        .unwrap_err();
    assert!(matches!(err, ReleaseError::Vcs(_)));
}

#[test]
fn test_tag_confirmed() {
    let project = Project::new("1.3.0");
    let repo = released_repo();

    let outcome = run_tag_workflow(&project.ctx(false), &repo, &Answer(true)).unwrap();
    assert_eq!(
        outcome,
        TagOutcome::Created {
            tag: "v1.3.0".to_string()
        }
    );
    assert_eq!(
        repo.mutations(),
        vec![
            Mutation::StageAll,
            Mutation::Commit("chore: release v1.3.0".to_string()),
            Mutation::Tag {
                name: "v1.3.0".to_string(),
                message: "release v1.3.0".to_string()
            },
        ]
    );
}

#[test]
fn test_tag_declined_changes_nothing() {
    let project = Project::new("1.3.0");
    let repo = released_repo();

    let outcome = run_tag_workflow(&project.ctx(false), &repo, &Answer(false)).unwrap();
    assert_eq!(outcome, TagOutcome::Declined);
    assert!(repo.mutations().is_empty());
}

#[test]
fn test_tag_dry_run_does_not_prompt() {
    struct Unreachable;
    impl Confirm for Unreachable {
        fn confirm(&self, _prompt: &str) -> io::Result<bool> {
            panic!("dry run must not prompt");
        }
    }

    let project = Project::new("1.3.0");
    let repo = released_repo();
    let outcome = run_tag_workflow(&project.ctx(true), &repo, &Unreachable).unwrap();
    assert_eq!(
        outcome,
        TagOutcome::Previewed {
            tag: "v1.3.0".to_string()
        }
    );
    assert!(repo.mutations().is_empty());
}

#[test]
fn test_tag_failure_propagates() {
    let project = Project::new("1.3.0");
    let repo = released_repo().failing_mutations();

    let err = run_tag_workflow(&project.ctx(false), &repo, &Answer(true)).unwrap_err();
    assert!(matches!(err, ReleaseError::Vcs(_)));
}
