//! Command workflows driven by the `release-bump` binary

pub mod orchestration;

pub use orchestration::{
    run_release_workflow, CancelStage, ReleaseWorkflowArgs, WorkflowOutcome, WorkflowResult,
};
