//! Core library for ordering and packaging npm-style monorepo sub-packages.

pub mod config;
pub mod cycles;
pub mod dev_deps;
pub mod error;
pub mod manifest;
pub mod resolver;
pub mod scanner;
pub mod version;

pub use config::WorkspaceConfig;
pub use cycles::find_cycles;
pub use dev_deps::{Change, DevDepSync, SyncPlan};
pub use error::{Error, Result};
pub use manifest::{find_manifest, JsonFileReader, Manifest, ManifestFields, ManifestReader};
pub use resolver::{Resolver, DEFAULT_RETRY_BUDGET};
pub use scanner::Scanner;
pub use version::compare_versions;
