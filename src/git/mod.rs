//! Version-control operations abstraction layer
//!
//! The release workflows talk to git only through the [VcsGateway] trait,
//! so they can run against a real repository or an in-memory fake.
//!
//! - [cli::GitCli]: shells out to the `git` executable
//! - [mock::MockGateway]: in-memory history for tests
//!
//! ```rust
//! # use auto_release::git::VcsGateway;
//! # fn example<G: VcsGateway>(git: &G) -> auto_release::Result<()> {
//! let last_tag = git.latest_tag()?;
//! let messages = git.commit_messages(last_tag.as_deref())?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::{MockGateway, Mutation};

use crate::error::Result;

/// One method per query or mutation the release workflows need.
///
/// Every failure of the underlying tool surfaces as
/// [ReleaseError::Vcs](crate::error::ReleaseError::Vcs); nothing is retried.
pub trait VcsGateway {
    /// URL of the configured remote.
    ///
    /// # Returns
    /// * `Ok(String)` - The trimmed URL
    /// * `Err` - If the remote is not configured
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// All tag names, most recently created first. Empty when there are none.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// The most recent tag reachable from HEAD, if any.
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Full commit messages in `(since, HEAD]`, oldest first.
    ///
    /// With `since` set to `None` the whole history is returned.
    fn commit_messages(&self, since: Option<&str>) -> Result<Vec<String>>;

    /// Stage every change in the working tree.
    fn stage_all(&self) -> Result<()>;

    /// Commit the staged changes.
    fn commit(&self, message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD.
    fn tag(&self, name: &str, message: &str) -> Result<()>;
}
