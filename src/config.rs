use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BumpError, Result};

/// File name looked up in the invocation directory.
pub const LOCAL_CONFIG_FILE: &str = "patch-bump.toml";

/// File name looked up in the user configuration directory.
pub const USER_CONFIG_FILE: &str = ".patch-bump.toml";

/// Represents the complete configuration for patch-bump.
///
/// Contains the manifest location, the git publish target, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_manifest_path() -> String {
    "pyproject.toml".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_commit_message() -> String {
    "Bump version to {version}".to_string()
}

fn default_push() -> bool {
    true
}

/// Where the declared version lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    /// Manifest path, relative to the invocation directory
    #[serde(default = "default_manifest_path")]
    pub path: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
        }
    }
}

/// Commit and push target for the bump commit.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Remote branch the current branch is pushed to
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Commit message template; `{version}` is replaced with the new version
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            branch: default_branch(),
            commit_message: default_commit_message(),
        }
    }
}

/// Which implementation drives the repository.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// In-process libgit2 through the `git2` crate
    #[default]
    Libgit2,
    /// The system `git` executable
    Cli,
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Push the bump commit after creating it
    #[serde(default = "default_push")]
    pub push: bool,

    #[serde(default)]
    pub git_backend: GitBackend,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            push: default_push(),
            git_backend: GitBackend::default(),
        }
    }
}

impl Config {
    /// Renders the commit message for a new version.
    pub fn commit_message(&self, version: &crate::version::Version) -> String {
        self.git
            .commit_message
            .replace("{version}", &version.to_string())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `patch-bump.toml` in current directory
/// 3. `.patch-bump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(BumpError::Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let source = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        Path::new(LOCAL_CONFIG_FILE).to_path_buf()
    } else {
        match dirs::config_dir().map(|dir| dir.join(USER_CONFIG_FILE)) {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        }
    };

    let config_str = fs::read_to_string(&source)
        .map_err(|e| BumpError::config(format!("cannot read {}: {}", source.display(), e)))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| BumpError::config(format!("invalid {}: {}", source.display(), e)))?;

    tracing::debug!(path = %source.display(), "loaded configuration");
    Ok(config)
}
