// tests/integration_test.rs
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use git2::{Repository, Signature};
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = "{\n  \"name\": \"demo\",\n  \"version\": \"1.2.0\"\n}\n";

fn auto_release(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("auto-release").expect("binary builds");
    cmd.current_dir(dir).env_remove("GITHUB_ACTIONS");
    cmd
}

// Helper function to setup a temporary git repo with one commit and a manifest
fn setup_test_repo(tag: Option<&str>) -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");
    repo.remote("origin", "https://github.com/o/r.git")
        .expect("Could not add remote");

    fs::write(temp_dir.path().join("package.json"), MANIFEST).expect("write manifest");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("package.json"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = Signature::now("Test User", "test@example.com").expect("signature");
    let commit_id = repo
        .commit(Some("HEAD"), &sig, &sig, "feat: initial", &tree, &[])
        .expect("Could not create commit");

    if let Some(tag) = tag {
        repo.tag_lightweight(tag, &repo.find_object(commit_id, None).unwrap(), false)
            .expect("Could not create tag");
    }

    temp_dir
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    auto_release(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("conventional commits"));
}

#[test]
fn test_unknown_command_prints_usage() {
    let dir = TempDir::new().unwrap();
    auto_release(dir.path())
        .arg("publish")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: auto-release <version|changelog|tag>"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_extra_arguments_print_usage() {
    let dir = TempDir::new().unwrap();
    auto_release(dir.path())
        .args(["publish", "now"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Usage: auto-release <version|changelog|tag>"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unknown_flag_prints_usage_without_changes() {
    let dir = setup_test_repo(Some("v1.1.0"));
    auto_release(dir.path())
        .args(["version", "--force"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Usage:"));

    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert_eq!(manifest, MANIFEST);
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    auto_release(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("auto-release"));
}

#[test]
fn test_missing_command_prints_usage() {
    let dir = TempDir::new().unwrap();
    auto_release(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_without_tags_is_noop() {
    let dir = setup_test_repo(None);
    auto_release(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags found"));

    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert_eq!(manifest, MANIFEST);
}

#[test]
fn test_changelog_dry_run_flag_after_command() {
    let dir = setup_test_repo(None);
    auto_release(dir.path())
        .args(["changelog", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- initial"));

    assert!(!dir.path().join("CHANGELOG.md").exists());
}

#[test]
fn test_changelog_dry_run_flag_before_command() {
    let dir = setup_test_repo(None);
    auto_release(dir.path())
        .args(["--dry-run", "changelog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(dry run)"));

    assert!(!dir.path().join("CHANGELOG.md").exists());
}

#[test]
fn test_changelog_writes_file() {
    let dir = setup_test_repo(None);
    auto_release(dir.path()).arg("changelog").assert().success();

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.starts_with("## Changelog\n\n### 1.2.0 ("));
    assert!(changelog.contains("#### Features\n\n- initial\n"));
    assert!(!dir.path().join(".RELEASE_NOTES.md").exists());
}

#[test]
fn test_changelog_in_ci_writes_release_notes() {
    let dir = setup_test_repo(None);
    auto_release(dir.path())
        .arg("changelog")
        .env("GITHUB_ACTIONS", "true")
        .assert()
        .success();

    let notes = fs::read_to_string(dir.path().join(".RELEASE_NOTES.md")).unwrap();
    assert_eq!(notes, "#### Features\n\n- initial\n");
}

#[test]
fn test_changelog_without_version_bump_fails() {
    let dir = setup_test_repo(Some("v1.2.0"));
    auto_release(dir.path())
        .arg("changelog")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not greater than last tag"));

    assert!(!dir.path().join("CHANGELOG.md").exists());
}

#[test]
fn test_tag_declined_on_empty_input() {
    let dir = setup_test_repo(Some("v1.1.0"));
    auto_release(dir.path())
        .arg("tag")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing changed"));

    let repo = Repository::open(dir.path()).unwrap();
    assert!(repo.find_reference("refs/tags/v1.2.0").is_err());
}
