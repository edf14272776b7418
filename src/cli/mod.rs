//! Command dispatch for the binary.

pub mod orchestration;

pub use orchestration::{
    run_changelog_workflow, run_tag_workflow, run_version_workflow, ChangelogOutcome, TagOutcome,
    VersionOutcome, WorkflowContext,
};

/// Usage line printed for a missing or unknown command.
pub const USAGE: &str = "Usage: auto-release <version|changelog|tag> [--dry-run] [--config <path>]";

/// The subcommands the dispatcher routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Version,
    Changelog,
    Tag,
}

impl Command {
    /// Maps the first positional argument to a command.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "version" => Some(Command::Version),
            "changelog" => Some(Command::Changelog),
            "tag" => Some(Command::Tag),
            _ => None,
        }
    }
}
