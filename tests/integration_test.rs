// tests/integration_test.rs
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_patch_bump_help() {
    Command::cargo_bin("patch-bump")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("patch-bump"))
        .stdout(predicate::str::contains("Bump the patch version"));
}

#[test]
fn test_patch_bump_version() {
    Command::cargo_bin("patch-bump")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("patch-bump "));
}

#[cfg(test)]
mod git_operations_tests {
    use super::*;
    use git2::{BranchType, Repository};
    use patch_bump::cli::{run_bump_workflow, BumpWorkflowArgs};
    use patch_bump::config::{Config, GitBackend};
    use patch_bump::git::{self, Git2Repository};
    use patch_bump::boundary::BoundaryWarning;
    use patch_bump::BumpError;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const MANIFEST: &str = "[project]\nname = \"demo\"\nversion = \"1.2.3\"\n";

    // A working repository with one commit and an `origin` remote pointing
    // at a bare repository in a sibling directory
    fn setup_test_repo() -> (TempDir, TempDir) {
        let work_dir = TempDir::new().expect("Could not create temp dir");
        let remote_dir = TempDir::new().expect("Could not create remote dir");

        Repository::init_bare(remote_dir.path()).expect("Could not init bare repo");
        let repo = Repository::init(work_dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        repo.remote("origin", remote_dir.path().to_str().unwrap())
            .expect("Could not add remote");

        fs::write(work_dir.path().join("pyproject.toml"), MANIFEST)
            .expect("Could not write manifest");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("pyproject.toml"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");
        let sig = repo.signature().expect("Could not get sig");
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .expect("Could not create commit");

        (work_dir, remote_dir)
    }

    fn remote_main_message(remote_dir: &Path) -> String {
        let remote = Repository::open_bare(remote_dir).expect("Could not open remote");
        let branch = remote
            .find_branch("main", BranchType::Local)
            .expect("main branch should exist on remote");
        let commit = branch.get().peel_to_commit().unwrap();
        commit.message().unwrap().to_string()
    }

    fn head_message(work_dir: &Path) -> String {
        let repo = Repository::open(work_dir).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        head.message().unwrap().to_string()
    }

    fn args_in(work_dir: &Path) -> BumpWorkflowArgs {
        BumpWorkflowArgs {
            manifest: Some(
                work_dir
                    .join("pyproject.toml")
                    .to_str()
                    .unwrap()
                    .to_string(),
            ),
            ..BumpWorkflowArgs::default()
        }
    }

    #[test]
    fn test_libgit2_bump_publishes_to_remote_main() {
        let (work_dir, remote_dir) = setup_test_repo();
        let repo = Git2Repository::open(work_dir.path()).unwrap();

        let result =
            run_bump_workflow(&repo, &args_in(work_dir.path()), &Config::default()).unwrap();

        assert!(result.pushed);
        assert_eq!(
            fs::read_to_string(work_dir.path().join("pyproject.toml")).unwrap(),
            MANIFEST.replace("1.2.3", "1.2.4")
        );
        assert_eq!(head_message(work_dir.path()), "Bump version to 1.2.4");
        assert_eq!(remote_main_message(remote_dir.path()), "Bump version to 1.2.4");
    }

    #[test]
    fn test_libgit2_two_bumps_make_two_commits() {
        let (work_dir, remote_dir) = setup_test_repo();
        let repo = Git2Repository::open(work_dir.path()).unwrap();
        let args = args_in(work_dir.path());

        run_bump_workflow(&repo, &args, &Config::default()).unwrap();
        run_bump_workflow(&repo, &args, &Config::default()).unwrap();

        let local = Repository::open(work_dir.path()).unwrap();
        let mut revwalk = local.revwalk().unwrap();
        revwalk.push_head().unwrap();
        let messages: Vec<String> = revwalk
            .map(|oid| {
                local
                    .find_commit(oid.unwrap())
                    .unwrap()
                    .message()
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert_eq!(
            messages,
            vec![
                "Bump version to 1.2.5",
                "Bump version to 1.2.4",
                "Initial commit"
            ]
        );
        assert_eq!(remote_main_message(remote_dir.path()), "Bump version to 1.2.5");
    }

    #[test]
    fn test_push_failure_keeps_commit_in_real_repo() {
        let (work_dir, _remote_dir) = setup_test_repo();
        {
            let raw = Repository::open(work_dir.path()).unwrap();
            raw.remote_set_url("origin", "/nonexistent/remote/repo.git")
                .unwrap();
        }
        let repo = Git2Repository::open(work_dir.path()).unwrap();

        let result = run_bump_workflow(&repo, &args_in(work_dir.path()), &Config::default());

        assert!(matches!(result, Err(BumpError::Push { .. })));
        assert_eq!(head_message(work_dir.path()), "Bump version to 1.2.4");
    }

    #[test]
    fn test_pending_manifest_edit_is_not_a_dirty_warning() {
        for backend in [GitBackend::Libgit2, GitBackend::Cli] {
            let (work_dir, _remote_dir) = setup_test_repo();
            fs::write(
                work_dir.path().join("pyproject.toml"),
                format!("{}description = \"edited\"\n", MANIFEST),
            )
            .unwrap();
            fs::write(work_dir.path().join("NOTES.md"), "draft\n").unwrap();

            let repo = git::open_repository(backend, work_dir.path()).unwrap();
            let result =
                run_bump_workflow(&repo, &args_in(work_dir.path()), &Config::default()).unwrap();

            assert_eq!(
                result.warnings,
                vec![BoundaryWarning::DirtyWorkingTree {
                    paths: vec!["NOTES.md".to_string()]
                }],
                "backend {:?}",
                backend
            );
        }
    }

    #[test]
    fn test_cli_backend_bump_publishes_to_remote_main() {
        let (work_dir, remote_dir) = setup_test_repo();
        let repo = git::open_repository(GitBackend::Cli, work_dir.path()).unwrap();

        let result =
            run_bump_workflow(&repo, &args_in(work_dir.path()), &Config::default()).unwrap();

        assert!(result.pushed);
        assert_eq!(head_message(work_dir.path()), "Bump version to 1.2.4");
        assert_eq!(remote_main_message(remote_dir.path()), "Bump version to 1.2.4");
    }

    #[test]
    fn test_binary_bumps_in_working_directory() {
        let (work_dir, remote_dir) = setup_test_repo();

        Command::cargo_bin("patch-bump")
            .unwrap()
            .current_dir(work_dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Bump version to 1.2.4"));

        assert_eq!(remote_main_message(remote_dir.path()), "Bump version to 1.2.4");
    }

    #[test]
    fn test_binary_reports_steps_and_warnings() {
        let (work_dir, _remote_dir) = setup_test_repo();
        fs::write(work_dir.path().join("NOTES.md"), "draft\n").unwrap();

        Command::cargo_bin("patch-bump")
            .unwrap()
            .current_dir(work_dir.path())
            .arg("--no-push")
            .assert()
            .success()
            .stdout(predicate::str::contains("Updated pyproject.toml to version 1.2.4"))
            .stdout(predicate::str::contains("Created commit"))
            .stderr(predicate::str::contains("NOTES.md"));
    }

    #[test]
    fn test_binary_dry_run_writes_nothing() {
        let (work_dir, remote_dir) = setup_test_repo();

        Command::cargo_bin("patch-bump")
            .unwrap()
            .current_dir(work_dir.path())
            .arg("--dry-run")
            .assert()
            .success()
            .stdout(predicate::str::contains("Dry run"));

        assert_eq!(
            fs::read_to_string(work_dir.path().join("pyproject.toml")).unwrap(),
            MANIFEST
        );
        assert_eq!(head_message(work_dir.path()), "Initial commit");
        assert!(Repository::open_bare(remote_dir.path())
            .unwrap()
            .find_branch("main", BranchType::Local)
            .is_err());
    }

    #[test]
    fn test_binary_fails_without_version_line() {
        let (work_dir, _remote_dir) = setup_test_repo();
        let manifest = work_dir.path().join("pyproject.toml");
        fs::write(&manifest, "[project]\nname = \"demo\"\n").unwrap();

        Command::cargo_bin("patch-bump")
            .unwrap()
            .current_dir(work_dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("no version assignment"));

        assert_eq!(
            fs::read_to_string(&manifest).unwrap(),
            "[project]\nname = \"demo\"\n"
        );
        assert_eq!(head_message(work_dir.path()), "Initial commit");
    }

    #[test]
    #[serial]
    fn test_open_repository_from_current_dir() {
        let (work_dir, _remote_dir) = setup_test_repo();
        let original_dir = env::current_dir().unwrap();

        env::set_current_dir(work_dir.path()).expect("Could not change to temp dir");
        let repo = Git2Repository::open(".");
        env::set_current_dir(original_dir).unwrap();

        assert!(
            repo.is_ok(),
            "Git2Repository::open(\".\") should succeed in a git directory"
        );
    }
}
