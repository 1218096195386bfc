use crate::config::CommitIdentity;
use crate::error::{ReleaseBumpError, Result};
use crate::git::ReleaseRepository;
use std::cell::RefCell;
use std::path::PathBuf;

/// A commit recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCommit {
    pub hash: String,
    pub paths: Vec<PathBuf>,
    pub message: String,
    pub identity: Option<CommitIdentity>,
}

/// A push recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPush {
    pub remote: String,
    pub branch: String,
    pub tags: Vec<String>,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: Option<String>,
    tags: RefCell<Vec<String>>,
    commits: RefCell<Vec<RecordedCommit>>,
    pushes: RefCell<Vec<RecordedPush>>,
    fail_push: bool,
}

impl MockRepository {
    /// Create a mock repository checked out on `branch`
    pub fn new(branch: impl Into<String>) -> Self {
        MockRepository {
            branch: Some(branch.into()),
            tags: RefCell::new(Vec::new()),
            commits: RefCell::new(Vec::new()),
            pushes: RefCell::new(Vec::new()),
            fail_push: false,
        }
    }

    /// Create a mock repository with a detached HEAD
    pub fn detached() -> Self {
        MockRepository {
            branch: None,
            ..MockRepository::new("")
        }
    }

    /// Add an existing tag
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.tags.borrow_mut().push(name.into());
        self
    }

    /// Make every push fail with a network-style error
    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    pub fn commits(&self) -> Vec<RecordedCommit> {
        self.commits.borrow().clone()
    }

    pub fn pushes(&self) -> Vec<RecordedPush> {
        self.pushes.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("main")
    }
}

impl ReleaseRepository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| ReleaseBumpError::Git(git2::Error::from_str("HEAD is detached")))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.borrow().iter().any(|t| t == name))
    }

    fn commit_paths(
        &self,
        paths: &[PathBuf],
        message: &str,
        identity: Option<&CommitIdentity>,
    ) -> Result<String> {
        let mut commits = self.commits.borrow_mut();
        let hash = format!("{:040x}", commits.len() + 1);
        commits.push(RecordedCommit {
            hash: hash.clone(),
            paths: paths.to_vec(),
            message: message.to_string(),
            identity: identity.cloned(),
        });
        Ok(hash)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.tag_exists(name)? {
            return Err(ReleaseBumpError::tag(format!("Tag '{}' already exists", name)));
        }
        self.tags.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str, tags: &[&str]) -> Result<()> {
        if self.fail_push {
            return Err(ReleaseBumpError::Git(git2::Error::from_str(&format!(
                "Network error during push to '{}'",
                remote
            ))));
        }
        self.pushes.borrow_mut().push(RecordedPush {
            remote: remote.to_string(),
            branch: branch.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        });
        Ok(())
    }
}
