use crate::config::CommitIdentity;
use crate::error::{ReleaseBumpError, Result};
use crate::git::ReleaseRepository;
use git2::{Cred, CredentialType, ErrorClass, PushOptions, RemoteCallbacks, Repository, Signature};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Repository,
}

impl Git2Repository {
    /// Open or discover a git repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path.as_ref()).map_err(|e| {
            ReleaseBumpError::Git(git2::Error::from_str(&format!(
                "Not in a git repository ({}): {}",
                path.as_ref().display(),
                e.message()
            )))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Repository) -> Self {
        Git2Repository { repo }
    }

    /// Path of `path` relative to the working tree root, as staged in the index
    fn index_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("Cannot commit in a bare repository"))?
            .canonicalize()?;
        let absolute = path.canonicalize()?;

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ReleaseBumpError::Git(git2::Error::from_str(&format!(
                    "'{}' is outside the working tree '{}'",
                    path.display(),
                    workdir.display()
                )))
            })
    }

    fn signature(&self, identity: Option<&CommitIdentity>) -> Result<Signature<'static>> {
        let signature = match identity {
            Some(identity) => Signature::now(&identity.name, &identity.email)?,
            None => self.repo.signature()?.to_owned(),
        };
        Ok(signature)
    }
}

/// Credentials callback: SSH keys from ~/.ssh, then the SSH agent, then the
/// configured credential helper, then default credentials.
fn remote_callbacks(config: git2::Config) -> RemoteCallbacks<'static> {
    let mut callbacks = RemoteCallbacks::new();

    callbacks.credentials(move |url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
                return Ok(cred);
            }
        }

        Cred::default()
    });

    // Rejected refs come back through this callback, not as a push error
    callbacks.push_update_reference(|refname, status| match status {
        Some(message) => Err(git2::Error::from_str(&format!(
            "Remote rejected {}: {}",
            refname, message
        ))),
        None => Ok(()),
    });

    callbacks
}

impl ReleaseRepository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(ReleaseBumpError::Git(git2::Error::from_str(
                "HEAD is detached; check out the branch to release from",
            )));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| ReleaseBumpError::Git(git2::Error::from_str("Branch name is not UTF-8")))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        let mut names: Vec<String> = tags.iter().flatten().map(str::to_string).collect();
        names.sort();
        Ok(names)
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn commit_paths(
        &self,
        paths: &[PathBuf],
        message: &str,
        identity: Option<&CommitIdentity>,
    ) -> Result<String> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(&self.index_path(path)?)?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parent = self.repo.head()?.peel_to_commit()?;
        let signature = self.signature(identity)?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(oid.to_string())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.tag_exists(name)? {
            return Err(ReleaseBumpError::tag(format!("Tag '{}' already exists", name)));
        }
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.tag_lightweight(name, head.as_object(), false)?;
        Ok(())
    }

    fn push(&self, remote_name: &str, branch: &str, tags: &[&str]) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            ReleaseBumpError::Git(git2::Error::from_str(&format!(
                "No remote named '{}' found",
                remote_name
            )))
        })?;

        let mut refspecs = vec![format!("refs/heads/{0}:refs/heads/{0}", branch)];
        refspecs.extend(tags.iter().map(|tag| format!("refs/tags/{0}:refs/tags/{0}", tag)));

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(remote_callbacks(self.repo.config()?));

        remote
            .push(&refspecs, Some(&mut push_options))
            .map_err(|e| {
                let context = match e.class() {
                    ErrorClass::Net => "Network error during push",
                    ErrorClass::Reference => "Reference error during push",
                    _ => "Failed to push",
                };
                ReleaseBumpError::Git(git2::Error::from_str(&format!(
                    "{} to '{}': {}",
                    context,
                    remote_name,
                    e.message()
                )))
            })
    }
}
