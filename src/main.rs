use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use release_bump::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowOutcome};
use release_bump::config;
use release_bump::domain::BumpAction;
use release_bump::git::Git2Repository;
use release_bump::ui::{self, AutoConfirm, TerminalPrompter};

#[derive(clap::Parser)]
#[command(
    name = "release-bump",
    version,
    about = "Bump the current release version, tag the release and push it"
)]
struct Args {
    #[arg(
        short,
        long,
        value_enum,
        help = "How to bump the version. `rc` increments the release candidate and `release` drops it"
    )]
    action: BumpAction,

    #[arg(
        long = "as-rc",
        alias = "asRC",
        help = "Start the new version as a release candidate. Not allowed with `rc` or `release`"
    )]
    as_rc: bool,

    #[arg(
        short = 'C',
        long,
        default_value = ".",
        help = "Project directory manifest paths are relative to"
    )]
    project_dir: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Remote to push to (overrides the configuration)")]
    remote: Option<String>,

    #[arg(short, long, help = "Skip confirmation prompts")]
    yes: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Commit and tag locally without pushing")]
    no_push: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref(), &args.project_dir)?;
    let repo = Git2Repository::open(&args.project_dir)?;

    let workflow_args = ReleaseWorkflowArgs {
        action: args.action,
        as_release_candidate: args.as_rc,
        project_dir: args.project_dir,
        remote: args.remote,
        dry_run: args.dry_run,
        no_push: args.no_push,
    };

    let outcome = if args.yes {
        run_release_workflow(&workflow_args, &config, &repo, &mut AutoConfirm)?
    } else {
        run_release_workflow(
            &workflow_args,
            &config,
            &repo,
            &mut TerminalPrompter::stdin(),
        )?
    };

    match outcome {
        WorkflowOutcome::Released(result) => {
            let location = if result.pushed {
                "published"
            } else {
                "created locally"
            };
            ui::display_success(&format!(
                "Release {} {} on branch {}",
                result.tag, location, result.branch
            ));
        }
        WorkflowOutcome::DryRun { tag, .. } => {
            ui::display_status(&format!("Dry run finished; {} was not created", tag));
        }
        WorkflowOutcome::Cancelled(_) => {}
    }

    Ok(())
}
