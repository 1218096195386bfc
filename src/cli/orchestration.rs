//! Release workflow orchestration
//!
//! Separates CLI argument parsing (main.rs) from the release steps so the
//! workflow can run against any [ReleaseRepository] and [Prompter].

use std::path::PathBuf;

use anyhow::Result;

use crate::boundary::BoundaryWarning;
use crate::config::{Config, ManifestKind};
use crate::domain::{next_version, BumpAction, TagPattern, Version};
use crate::error::ReleaseBumpError;
use crate::git::ReleaseRepository;
use crate::manifest::{plan_updates, Manifest};
use crate::ui::{self, Prompter};

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    pub action: BumpAction,

    /// Start the new base version as release candidate 1
    pub as_release_candidate: bool,

    /// Directory manifest paths are resolved against
    pub project_dir: PathBuf,

    /// Remote override; the configured remote is used when `None`
    pub remote: Option<String>,

    /// Preview mode - no files written, no commit, tag or push
    pub dry_run: bool,

    /// Never push, even when confirmed
    pub no_push: bool,
}

impl ReleaseWorkflowArgs {
    pub fn new(action: BumpAction, project_dir: impl Into<PathBuf>) -> Self {
        ReleaseWorkflowArgs {
            action,
            as_release_candidate: false,
            project_dir: project_dir.into(),
            remote: None,
            dry_run: false,
            no_push: false,
        }
    }
}

/// The confirmation step at which the user stopped the release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelStage {
    Branch,
    Version,
}

/// Result of a completed release
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub previous: Version,
    pub version: Version,
    pub tag: String,
    pub branch: String,
    pub commit: String,
    pub build_code: Option<u32>,
    pub files: Vec<PathBuf>,
    /// Whether the branch and tag were pushed to the remote
    pub pushed: bool,
    pub warnings: Vec<BoundaryWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Released(WorkflowResult),
    DryRun {
        previous: Version,
        version: Version,
        tag: String,
        branch: String,
        files: Vec<PathBuf>,
        warnings: Vec<BoundaryWarning>,
    },
    Cancelled(CancelStage),
}

/// Main release workflow
///
/// 1. Read the current version and compute the next one
/// 2. Check the new tag against existing tags
/// 3. Render every manifest in memory
/// 4. Confirm the branch and the version change
/// 5. Write manifests, commit, tag
/// 6. Confirm and push
///
/// Nothing is written before both confirmations are given, and validation
/// errors surface before any prompt.
pub fn run_release_workflow<R, P>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    repo: &R,
    prompter: &mut P,
) -> Result<WorkflowOutcome>
where
    R: ReleaseRepository,
    P: Prompter,
{
    config.validate()?;
    let pattern = config.git.tag_pattern();

    let source = Manifest::from_config(&args.project_dir, &config.version_source);
    let current = source.read_version(&pattern)?;
    let next = next_version(&current, args.action, args.as_release_candidate)?;

    let current_tag = pattern.format(&current);
    let tag = pattern.format(&next);

    if repo.tag_exists(&tag)? {
        return Err(ReleaseBumpError::tag(format!("Tag '{}' already exists", tag)).into());
    }
    let mut warnings = Vec::new();
    if let Some((latest_tag, latest)) = newest_release_tag(&repo.list_tags()?, &pattern) {
        if latest >= next.to_semver()? {
            warnings.push(BoundaryWarning::NotNewestVersion {
                new_tag: tag.clone(),
                latest_tag,
            });
        }
    }

    let manifests: Vec<Manifest> = std::iter::once(source)
        .chain(
            config
                .manifests
                .iter()
                .map(|m| Manifest::from_config(&args.project_dir, m)),
        )
        .collect();
    let plan = plan_updates(&manifests, &next, &pattern)?;

    for (path, found) in plan.out_of_sync(&current) {
        warnings.push(BoundaryWarning::ManifestOutOfSync {
            path,
            found: found.to_string(),
            expected: current.to_string(),
        });
    }
    for (path, found) in plan.unreadable() {
        warnings.push(BoundaryWarning::ManifestVersionUnreadable { path, found });
    }
    let tracks_build_code = manifests
        .iter()
        .any(|m| matches!(m.kind, ManifestKind::ExpoConfig | ManifestKind::Gradle));
    if tracks_build_code && plan.target.build_code.is_none() {
        warnings.push(BoundaryWarning::NoBuildCode);
    }
    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }

    let branch = repo.current_branch()?;
    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| config.git.remote.clone());

    if args.dry_run {
        ui::display_version_change(&current_tag, &tag);
        ui::display_updated_files(&args.project_dir, &plan.paths());
        ui::display_dry_run_plan(&branch, &tag, (!args.no_push).then_some(remote.as_str()));
        return Ok(WorkflowOutcome::DryRun {
            previous: current,
            version: next,
            tag,
            branch,
            files: plan.paths(),
            warnings,
        });
    }

    if config.behavior.confirm_branch
        && !prompter.confirm(&format!(
            "\nDo you want to create a release on branch `{}`? Confirm branch?",
            branch
        ))?
    {
        ui::display_cancelled("Cancelled release.");
        return Ok(WorkflowOutcome::Cancelled(CancelStage::Branch));
    }

    ui::display_version_change(&current_tag, &tag);
    if !prompter.confirm("Confirm change?")? {
        ui::display_cancelled("Cancelled changes.");
        return Ok(WorkflowOutcome::Cancelled(CancelStage::Version));
    }

    let files = plan.apply()?;
    ui::display_updated_files(&args.project_dir, &files);

    let message = config
        .git
        .render_commit_message(&tag, &next.to_string());
    let commit = repo.commit_paths(&files, &message, config.git.author.as_ref())?;
    repo.create_tag(&tag)?;
    ui::display_success(&format!("Created tag {}.", tag));

    let pushed = if args.no_push {
        ui::display_manual_push_instruction(&remote, &branch, &tag);
        false
    } else if prompter.confirm(&format!("Push changes to '{}'?", remote))? {
        ui::display_status(&format!("Pushing '{}' and {} to {}", branch, tag, remote));
        repo.push(&remote, &branch, &[tag.as_str()])?;
        ui::display_success(&format!("Pushed {} to {}", tag, remote));
        true
    } else {
        ui::display_cancelled("Cancelled push.");
        ui::display_manual_push_instruction(&remote, &branch, &tag);
        false
    };

    Ok(WorkflowOutcome::Released(WorkflowResult {
        previous: current,
        version: next,
        tag,
        branch,
        commit,
        build_code: plan.target.build_code,
        files,
        pushed,
        warnings,
    }))
}

/// The existing tag with the highest version, among tags matching `pattern`.
pub fn newest_release_tag(
    tags: &[String],
    pattern: &TagPattern,
) -> Option<(String, semver::Version)> {
    tags.iter()
        .filter(|tag| pattern.matches(tag))
        .filter_map(|tag| {
            let version = pattern.extract(tag).ok()?.to_semver().ok()?;
            Some((tag.clone(), version))
        })
        .max_by(|a, b| a.1.cmp(&b.1))
}
