//! Main workflow orchestration logic
//!
//! The bump runs as a fixed sequence of steps: extract the version, compute
//! the next one, rewrite the manifest, stage, commit, push. Each step
//! returns a `Result` and the first failure ends the run; nothing is rolled
//! back, so a failed push leaves the bump commit in local history.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::error::{BumpError, Result};
use crate::git::{CommitInfo, Repository};
use crate::manifest::Manifest;
use crate::version::Version;

/// Arguments for the bump workflow
///
/// Mirrors the CLI Args; `None` falls back to the configuration value.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BumpWorkflowArgs {
    /// Manifest path override
    pub manifest: Option<String>,

    /// Remote override
    pub remote: Option<String>,

    /// Remote branch override
    pub branch: Option<String>,

    /// Commit without pushing
    pub no_push: bool,

    /// Preview mode - don't write the manifest or touch the repository
    pub dry_run: bool,
}

/// Result of a successful bump
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The manifest that was (or would be) rewritten
    pub manifest: PathBuf,

    /// Version found in the manifest
    pub previous: Version,

    /// Version written to the manifest
    pub next: Version,

    /// Commit message used for the bump commit
    pub message: String,

    /// The bump commit; `None` on a dry run
    pub commit: Option<CommitInfo>,

    /// Whether the commit was pushed
    pub pushed: bool,

    /// Non-fatal conditions met along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Computes the version that follows the one declared in `manifest`.
pub fn next_version(manifest: &Manifest) -> Result<Version> {
    manifest.version().bump_patch()
}

/// Main bump workflow
///
/// 1. Load the manifest and extract the current version
/// 2. Compute the next patch version
/// 3. Write the manifest back
/// 4. Stage all changes, commit, and push to `<remote>/<branch>`
///
/// A manifest without a version assignment fails at step 1, before the
/// file or the repository is touched.
///
/// # Returns
/// * `Ok(WorkflowResult)` - The bump was committed (and pushed unless disabled)
/// * `Err(BumpError::Push)` - The commit exists locally but the push failed
/// * `Err(_)` - Any earlier step failed; later steps did not run
pub fn run_bump_workflow<R: Repository + ?Sized>(
    repo: &R,
    args: &BumpWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let manifest_path = PathBuf::from(args.manifest.as_deref().unwrap_or(&config.manifest.path));
    let remote = args.remote.as_deref().unwrap_or(&config.git.remote);
    let branch = args.branch.as_deref().unwrap_or(&config.git.branch);
    let push = config.behavior.push && !args.no_push;

    let mut manifest = Manifest::load(&manifest_path)?;
    let previous = manifest.version();
    let next = next_version(&manifest)?;
    let message = config.commit_message(&next);

    debug!(%previous, %next, manifest = %manifest_path.display(), "computed next version");

    let mut result = WorkflowResult {
        manifest: manifest_path,
        previous,
        next,
        message,
        commit: None,
        pushed: false,
        warnings: Vec::new(),
    };

    if args.dry_run {
        return Ok(result);
    }

    let dirty = other_changes(repo, &result.manifest)?;
    if !dirty.is_empty() {
        report(&mut result, BoundaryWarning::DirtyWorkingTree { paths: dirty });
    }

    manifest.set_version(next);
    manifest.save()?;
    debug!(line = manifest.version_line().trim(), "updated manifest");

    repo.stage_all()?;
    let commit = repo.commit(&result.message)?;

    if push {
        debug!(remote, branch, commit = %commit.hash, "pushing bump commit");
        repo.push(remote, branch).map_err(|e| BumpError::Push {
            commit: commit.hash.clone(),
            remote: remote.to_string(),
            branch: branch.to_string(),
            reason: e.to_string(),
        })?;
        result.pushed = true;
    } else {
        report(
            &mut result,
            BoundaryWarning::PushSkipped {
                remote: remote.to_string(),
                branch: branch.to_string(),
            },
        );
    }

    result.commit = Some(commit);
    Ok(result)
}

/// Uncommitted changes other than the manifest itself.
fn other_changes<R: Repository + ?Sized>(repo: &R, manifest: &Path) -> Result<Vec<String>> {
    let mut dirty = repo.dirty_paths()?;

    if let Some(own) = repo.workdir().and_then(|root| repo_relative(root, manifest)) {
        dirty.retain(|path| *path != own);
    }

    Ok(dirty)
}

/// `path` relative to the working tree `root`, `/`-separated as git reports it.
fn repo_relative(root: &Path, path: &Path) -> Option<String> {
    let root = root.canonicalize().ok()?;
    let path = path.canonicalize().ok()?;
    let relative = path.strip_prefix(&root).ok()?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

fn report(result: &mut WorkflowResult, warning: BoundaryWarning) {
    warn!(%warning, "bump warning");
    result.warnings.push(warning);
}
