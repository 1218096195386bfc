//! Git operations abstraction layer
//!
//! The release workflow only depends on the [ReleaseRepository] trait:
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation that records operations
//!
//! ```rust
//! # use release_bump::git::ReleaseRepository;
//! # fn example<R: ReleaseRepository>(repo: &R) -> release_bump::Result<()> {
//! let branch = repo.current_branch()?;
//! if !repo.tag_exists("v1.0.0")? {
//!     repo.create_tag("v1.0.0")?;
//!     repo.push("origin", &branch, &["v1.0.0"])?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::config::CommitIdentity;
use crate::error::Result;
use std::path::PathBuf;

/// Source-control operations needed to publish a release
///
/// Methods take `&self`; implementations that record state use interior
/// mutability.
pub trait ReleaseRepository {
    /// Name of the checked-out branch
    ///
    /// # Returns
    /// * `Ok(String)` - Branch name (e.g., "main")
    /// * `Err` - If HEAD is detached, unborn, or on error
    fn current_branch(&self) -> Result<String>;

    /// All tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Whether a tag with this exact name exists
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Stage the given files and commit them on HEAD
    ///
    /// # Arguments
    /// * `paths` - Files to stage; must live inside the working tree
    /// * `message` - Commit message
    /// * `identity` - Author/committer override; the repository identity is used when `None`
    ///
    /// # Returns
    /// * `Ok(String)` - Hash of the new commit
    fn commit_paths(
        &self,
        paths: &[PathBuf],
        message: &str,
        identity: Option<&CommitIdentity>,
    ) -> Result<String>;

    /// Create a lightweight tag on HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push a branch and tags to a remote
    ///
    /// # Arguments
    /// * `remote` - Remote name (e.g., "origin")
    /// * `branch` - Local branch pushed to the same name on the remote
    /// * `tags` - Tags pushed alongside the branch
    fn push(&self, remote: &str, branch: &str, tags: &[&str]) -> Result<()>;
}
