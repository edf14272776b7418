use std::fmt;

/// Conditions that end a run early without failing it.
/// These are reported to the user and the process still exits with status 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// The repository has no tags, so the first release must be bootstrapped by hand
    NoTags,
    /// No commit since the latest tag calls for a release
    NoReleasableCommits { latest_tag: Option<String> },
    /// No previous tag to compare against; the changelog starts fresh
    InitialChangelog,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTags => write!(
                f,
                "No tags found. Please run script to init CHANGELOG.md first, then create first tag."
            ),
            BoundaryWarning::NoReleasableCommits { latest_tag } => match latest_tag {
                Some(tag) => write!(
                    f,
                    "No new commits or version bump required since '{}'. Skipping...",
                    tag
                ),
                None => write!(f, "No new commits or version bump required. Skipping..."),
            },
            BoundaryWarning::InitialChangelog => {
                write!(f, "No tags found. Creating initial changelog...")
            }
        }
    }
}
