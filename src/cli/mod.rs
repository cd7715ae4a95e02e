//! Command-line workflow, kept separate from argument parsing in `main`.

pub mod orchestration;

pub use orchestration::{run_bump_workflow, BumpWorkflowArgs, WorkflowResult};
