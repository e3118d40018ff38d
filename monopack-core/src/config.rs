//! Workspace configuration from `monopack.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::resolver::DEFAULT_RETRY_BUDGET;

/// Name of the workspace configuration file.
pub const CONFIG_FILE: &str = "monopack.toml";

const DEFAULT_PACKAGES_DIR: &str = "packages";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    workspace: WorkspaceConfig,
}

/// Workspace-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory holding sub-packages, relative to the config file.
    pub packages_dir: Option<String>,
    /// Deferrals allowed per package before it is force-placed.
    pub retry_budget: Option<u32>,
    /// Dev dependencies to leave alone in addition to the defaults.
    #[serde(default)]
    pub skip_dev_deps: Vec<String>,
    /// Path to the config file (for resolving relative paths).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl WorkspaceConfig {
    /// Parses configuration text.
    pub fn parse(content: &str, context: &Path) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|error| Error::Toml {
            error,
            context: context.display().to_string(),
        })?;
        Ok(file.workspace)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content, path)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Looks for `monopack.toml` in `start_dir` and its ancestors.
    ///
    /// The search stops at a repository root (a directory containing `.git`)
    /// or the filesystem root. Returns defaults if nothing is found.
    pub fn discover(start_dir: impl AsRef<Path>) -> Result<Self> {
        let mut current = Some(start_dir.as_ref());

        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "loading workspace config");
                return Self::load(candidate);
            }
            if dir.join(".git").exists() {
                break;
            }
            current = dir.parent();
        }

        Ok(Self::default())
    }

    /// Packages directory, resolved against the config file's directory.
    pub fn packages_dir(&self) -> PathBuf {
        let configured = PathBuf::from(
            self.packages_dir
                .as_deref()
                .unwrap_or(DEFAULT_PACKAGES_DIR),
        );
        if configured.is_absolute() {
            return configured;
        }

        self.config_path
            .as_ref()
            .and_then(|path| path.parent())
            .map(|dir| dir.join(&configured))
            .unwrap_or(configured)
    }

    #[inline]
    pub fn retry_budget(&self) -> u32 {
        self.retry_budget.unwrap_or(DEFAULT_RETRY_BUDGET)
    }
}
