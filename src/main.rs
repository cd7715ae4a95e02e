use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use patch_bump::boundary::BoundaryWarning;
use patch_bump::cli::{run_bump_workflow, BumpWorkflowArgs};
use patch_bump::{config, git, ui, BumpError};

#[derive(clap::Parser)]
#[command(
    name = "patch-bump",
    about = "Bump the patch version in a package manifest, commit, and push it",
    disable_version_flag = true
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Manifest holding the version (default: pyproject.toml)")]
    manifest: Option<String>,

    #[arg(long, help = "Remote to push to (default: origin)")]
    remote: Option<String>,

    #[arg(long, help = "Remote branch to push to (default: main)")]
    branch: Option<String>,

    #[arg(long, help = "Commit the bump without pushing it")]
    no_push: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides; default keeps diagnostics quiet
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("patch_bump=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if args.version {
        println!("patch-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let repo = match git::open_repository(config.behavior.git_backend, ".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = BumpWorkflowArgs {
        manifest: args.manifest,
        remote: args.remote,
        branch: args.branch,
        no_push: args.no_push,
        dry_run: args.dry_run,
    };
    let remote = workflow_args
        .remote
        .clone()
        .unwrap_or_else(|| config.git.remote.clone());
    let branch = workflow_args
        .branch
        .clone()
        .unwrap_or_else(|| config.git.branch.clone());

    match run_bump_workflow(&repo, &workflow_args, &config) {
        Ok(result) => {
            ui::display_summary(&result, &remote, &branch);
            Ok(())
        }
        Err(BumpError::Push {
            commit,
            remote,
            branch,
            reason,
        }) => {
            ui::display_error(&format!("Push failed: {}", reason));
            ui::display_boundary_warning(&BoundaryWarning::LocalCommitNotPushed {
                commit,
                remote: remote.clone(),
                branch: branch.clone(),
            });
            ui::display_manual_push_instruction(&remote, &branch);
            std::process::exit(1);
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
