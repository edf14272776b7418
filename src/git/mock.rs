use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{ReleaseError, Result};
use crate::git::VcsGateway;

/// A repository mutation recorded by [MockGateway].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    StageAll,
    Commit(String),
    Tag { name: String, message: String },
}

#[derive(Debug, Clone)]
enum Entry {
    Commit(String),
    Tag(String),
}

#[derive(Debug, Default)]
struct State {
    history: Vec<Entry>,
    mutations: Vec<Mutation>,
}

/// In-memory, linear repository history for tests without a git binary.
///
/// Tags point at the position in history where they were added, so
/// `commit_messages(Some(tag))` yields everything recorded after that tag.
#[derive(Debug, Default)]
pub struct MockGateway {
    remotes: HashMap<String, String>,
    fail_mutations: bool,
    state: Mutex<State>,
}

impl MockGateway {
    /// Create an empty mock repository without remotes
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a remote URL
    pub fn with_remote(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.remotes.insert(name.into(), url.into());
        self
    }

    /// Append a commit to history
    pub fn with_commit(self, message: impl Into<String>) -> Self {
        self.lock().history.push(Entry::Commit(message.into()));
        self
    }

    /// Tag the current end of history
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.lock().history.push(Entry::Tag(name.into()));
        self
    }

    /// Make every mutation fail, as git does with nothing to commit
    pub fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    /// Mutations performed so far, in order
    pub fn mutations(&self) -> Vec<Mutation> {
        self.lock().mutations.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means another test thread panicked
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn mutate(&self, mutation: Mutation) -> Result<()> {
        if self.fail_mutations {
            return Err(ReleaseError::vcs(format!("mock refused {:?}", mutation)));
        }

        let mut state = self.lock();
        match &mutation {
            Mutation::Commit(message) => state.history.push(Entry::Commit(message.clone())),
            Mutation::Tag { name, .. } => {
                let exists = state
                    .history
                    .iter()
                    .any(|e| matches!(e, Entry::Tag(t) if t == name));
                if exists {
                    return Err(ReleaseError::vcs(format!("tag '{}' already exists", name)));
                }
                state.history.push(Entry::Tag(name.clone()));
            }
            Mutation::StageAll => {}
        }
        state.mutations.push(mutation);
        Ok(())
    }
}

impl VcsGateway for MockGateway {
    fn remote_url(&self, remote: &str) -> Result<String> {
        self.remotes
            .get(remote)
            .cloned()
            .ok_or_else(|| ReleaseError::vcs(format!("No such remote '{}'", remote)))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .lock()
            .history
            .iter()
            .rev()
            .filter_map(|e| match e {
                Entry::Tag(name) => Some(name.clone()),
                Entry::Commit(_) => None,
            })
            .collect())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self.list_tags()?.into_iter().next())
    }

    fn commit_messages(&self, since: Option<&str>) -> Result<Vec<String>> {
        let state = self.lock();
        let start = match since {
            Some(tag) => state
                .history
                .iter()
                .position(|e| matches!(e, Entry::Tag(t) if t == tag))
                .map(|i| i + 1)
                .ok_or_else(|| {
                    ReleaseError::vcs(format!("ambiguous argument '{}..HEAD'", tag))
                })?,
            None => 0,
        };

        Ok(state.history[start..]
            .iter()
            .filter_map(|e| match e {
                Entry::Commit(message) => Some(message.clone()),
                Entry::Tag(_) => None,
            })
            .collect())
    }

    fn stage_all(&self) -> Result<()> {
        self.mutate(Mutation::StageAll)
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.mutate(Mutation::Commit(message.to_string()))
    }

    fn tag(&self, name: &str, message: &str) -> Result<()> {
        self.mutate(Mutation::Tag {
            name: name.to_string(),
            message: message.to_string(),
        })
    }
}
