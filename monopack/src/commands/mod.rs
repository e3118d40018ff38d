//! Command implementations for the CLI.

mod discovery;
mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use monopack_core::{Scanner, WorkspaceConfig};

pub use discovery::{cmd_order, cmd_scan};
pub use sync::cmd_sync_dev_deps;

/// Workspace settings shared by all commands.
pub struct Workspace {
    pub root: PathBuf,
    pub config: WorkspaceConfig,
    pub packages_dir: PathBuf,
}

impl Workspace {
    /// Loads `monopack.toml` from the working directory upwards.
    ///
    /// An explicit packages directory overrides the configured one.
    pub fn load(packages_dir: Option<PathBuf>) -> Result<Self> {
        let root = std::env::current_dir().context("Cannot determine working directory")?;
        let config = WorkspaceConfig::discover(&root)?;
        let packages_dir = packages_dir.unwrap_or_else(|| config.packages_dir());
        let packages_dir = if packages_dir.is_absolute() {
            packages_dir
        } else {
            root.join(packages_dir)
        };

        Ok(Self {
            root,
            config,
            packages_dir,
        })
    }

    fn scanner(&self) -> Scanner {
        Scanner::new(&self.packages_dir)
    }
}
