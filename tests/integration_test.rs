// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use git2::{Repository, Signature};
use release_bump::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowOutcome};
use release_bump::config::{load_config, ManifestConfig, ManifestKind};
use release_bump::domain::BumpAction;
use release_bump::git::{Git2Repository, ReleaseRepository};
use release_bump::ui::AutoConfirm;
use tempfile::TempDir;

fn release_bump() -> Command {
    Command::new(env!("CARGO_BIN_EXE_release-bump"))
}

#[test]
fn test_release_bump_help() {
    let output = release_bump()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-bump"));
    assert!(stdout.contains("--action"));
    assert!(stdout.contains("--as-rc"));
}

#[test]
fn test_release_bump_version() {
    let output = release_bump()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_action_is_rejected() {
    let output = release_bump()
        .args(["--action", "hotfix"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("hotfix"));
}

#[test]
fn test_missing_action_is_rejected() {
    let output = release_bump()
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
}

#[test]
fn test_outside_git_repository_fails_with_exit_code_1() {
    let dir = TempDir::new().unwrap();
    let output = release_bump()
        .args(["--action", "patch", "--yes", "--no-push", "-C"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

fn init_repository(dir: &Path) -> Repository {
    let repo = Repository::init(dir).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    repo
}

fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let signature = Signature::now("Test User", "test@example.com").unwrap();
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parent_refs,
    )
    .unwrap();
}

#[test]
fn test_release_in_real_repository() {
    let dir = TempDir::new().unwrap();
    let repo = init_repository(dir.path());

    // project lives in a subdirectory of the repository
    let project = dir.path().join("mobile");
    fs::create_dir_all(project.join("src/constants")).unwrap();
    fs::write(
        project.join("src/constants/Config.ts"),
        "export const APP_VERSION = \"v0.4.1\";\n",
    )
    .unwrap();
    fs::write(
        project.join("package.json"),
        "{\n  \"name\": \"mobile\",\n  \"version\": \"0.4.1\"\n}\n",
    )
    .unwrap();
    fs::write(project.join("README.md"), "untouched\n").unwrap();
    commit_all(&repo, "initial");

    let mut config = load_config(None, &project).unwrap();
    config.manifests = vec![ManifestConfig::new(ManifestKind::PackageJson, "package.json")];

    let mut args = ReleaseWorkflowArgs::new(BumpAction::Minor, &project);
    args.no_push = true;

    let git = Git2Repository::open(&project).unwrap();
    let outcome = run_release_workflow(&args, &config, &git, &mut AutoConfirm).unwrap();

    let result = match outcome {
        WorkflowOutcome::Released(result) => result,
        other => panic!("expected a release, got {:?}", other),
    };
    assert_eq!(result.tag, "v0.5.0");
    assert!(!result.pushed);
    assert!(git.tag_exists("v0.5.0").unwrap());

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("release: v0.5.0"));
    assert_eq!(head.id().to_string(), result.commit);

    let tag_target = repo
        .find_reference("refs/tags/v0.5.0")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    assert_eq!(tag_target.id(), head.id());

    let tree = head.tree().unwrap();
    let blob = tree
        .get_path(Path::new("mobile/package.json"))
        .unwrap()
        .to_object(&repo)
        .unwrap()
        .peel_to_blob()
        .unwrap();
    let committed = String::from_utf8(blob.content().to_vec()).unwrap();
    assert!(committed.contains("\"version\": \"0.5.0\""));

    // releasing the same version again is refused
    let err = git.create_tag("v0.5.0").unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_real_repository_reports_current_branch() {
    let dir = TempDir::new().unwrap();
    let repo = init_repository(dir.path());
    fs::write(dir.path().join("file.txt"), "content").unwrap();
    commit_all(&repo, "initial");

    {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.branch("release/1.x", &head, false).unwrap();
    }
    repo.set_head("refs/heads/release/1.x").unwrap();

    let git = Git2Repository::from_git2(repo);
    assert_eq!(git.current_branch().unwrap(), "release/1.x");
}

fn init_project(version: &str) -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = init_repository(dir.path());
    fs::create_dir_all(dir.path().join("src/constants")).unwrap();
    fs::write(
        dir.path().join("src/constants/Config.ts"),
        format!("export const APP_VERSION = \"v{}\";\n", version),
    )
    .unwrap();
    fs::write(
        dir.path().join("releasebump.toml"),
        "manifests = []\n\n[behavior]\nconfirm_branch = false\n",
    )
    .unwrap();
    commit_all(&repo, "initial");
    (dir, repo)
}

#[test]
fn test_as_rc_camel_case_alias_starts_candidate() {
    let (dir, repo) = init_project("1.2.3");

    let output = release_bump()
        .args(["--action", "minor", "--asRC", "--yes", "--no-push", "-C"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(repo.find_reference("refs/tags/v1.3.0-rc.1").is_ok());
    assert_eq!(
        fs::read_to_string(dir.path().join("src/constants/Config.ts")).unwrap(),
        "export const APP_VERSION = \"v1.3.0-rc.1\";\n"
    );
}

#[test]
fn test_as_rc_alias_with_release_action_fails() {
    let (dir, repo) = init_project("1.3.0-rc.1");

    let output = release_bump()
        .args(["--action", "release", "--asRC", "--yes", "--no-push", "-C"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("asRC flag incompatible"));
    assert_eq!(repo.tag_names(None).unwrap().len(), 0);
}
