//! Synchronization of shared development dependencies.
//!
//! A parent tooling package declares the dev dependencies every project built
//! with it needs. Syncing adds the ones a project lacks and raises the ones it
//! pins lower than the parent.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::Result;
use crate::manifest::{JsonFileReader, ManifestFields, ManifestReader};
use crate::version::{compare_versions, strip_range_operators};

const DEV_DEPENDENCIES: &str = "devDependencies";

/// Dev dependencies that projects manage themselves.
pub const DEFAULT_SKIPPED: [&str; 5] = ["mocha", "chai", "mocha-typescript", "typescript", "ts-node"];

/// Type declaration packages are never synced.
const TYPES_SCOPE: &str = "@types/";

/// One change to a project's dev dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Change {
    Add { name: String, version: String },
    /// `requested` is the parent's constraint as declared; `to` is what gets
    /// written, with range operators removed.
    Update {
        name: String,
        from: String,
        to: String,
        requested: String,
    },
}

impl Change {
    pub fn name(&self) -> &str {
        match self {
            Change::Add { name, .. } | Change::Update { name, .. } => name,
        }
    }

    /// The version written into the project's manifest.
    pub fn version(&self) -> &str {
        match self {
            Change::Add { version, .. } => version,
            Change::Update { to, .. } => to,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Add { name, version } => write!(f, "add {} {}", name, version),
            Change::Update {
                name, requested, ..
            } => write!(f, "update {} {}", name, requested),
        }
    }
}

/// Changes needed to bring a project in line with its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub changes: Vec<Change>,
}

impl SyncPlan {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Writes the planned versions into `target`'s dev dependencies.
    ///
    /// The dev dependency table is created if the manifest has none.
    pub fn apply(&self, target: &mut ManifestFields) {
        if self.is_empty() {
            return;
        }

        let dev_deps = target
            .entry(DEV_DEPENDENCIES)
            .or_insert_with(|| Value::Object(Map::new()));
        if !dev_deps.is_object() {
            *dev_deps = Value::Object(Map::new());
        }

        if let Value::Object(table) = dev_deps {
            for change in &self.changes {
                table.insert(
                    change.name().to_string(),
                    Value::String(change.version().to_string()),
                );
            }
        }
    }
}

/// Plans dev dependency updates from a parent manifest.
#[derive(Debug, Clone)]
pub struct DevDepSync {
    skip: Vec<String>,
}

impl Default for DevDepSync {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIPPED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DevDepSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds names to skip on top of the defaults.
    pub fn with_skipped<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.skip.contains(&name) {
                self.skip.push(name);
            }
        }
        self
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        name.starts_with(TYPES_SCOPE) || self.skip.iter().any(|s| s == name)
    }

    /// Compares the dev dependencies of `source` against `target`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidVersion`] when a shared dependency's versions
    /// cannot be compared.
    pub fn plan(&self, source: &ManifestFields, target: &ManifestFields) -> Result<SyncPlan> {
        let empty = Map::new();
        let source_deps = dev_dependencies(source).unwrap_or(&empty);
        let target_deps = dev_dependencies(target).unwrap_or(&empty);

        let mut plan = SyncPlan::default();

        for (name, version) in source_deps {
            if self.is_skipped(name) {
                continue;
            }
            let Some(version) = version.as_str() else {
                debug!(dependency = %name, "skipping non-string version");
                continue;
            };

            match target_deps.get(name).and_then(|v| v.as_str()) {
                None => plan.changes.push(Change::Add {
                    name: name.clone(),
                    version: version.to_string(),
                }),
                Some(current) => {
                    let wanted = strip_range_operators(version);
                    let installed = strip_range_operators(current);
                    if compare_versions(&installed, &wanted)? == Ordering::Less {
                        plan.changes.push(Change::Update {
                            name: name.clone(),
                            from: current.to_string(),
                            to: wanted,
                            requested: version.to_string(),
                        });
                    }
                }
            }
        }

        Ok(plan)
    }

    /// Syncs the manifest at `target_path` against the one at `source_path`.
    ///
    /// Nothing is written when the plan is empty or `dry_run` is set.
    pub fn sync_file(
        &self,
        source_path: impl AsRef<Path>,
        target_path: impl AsRef<Path>,
        dry_run: bool,
    ) -> Result<SyncPlan> {
        let target_path = target_path.as_ref();
        let reader = JsonFileReader;
        let source = reader.read(source_path.as_ref())?;
        let mut target = reader.read(target_path)?;

        let plan = self.plan(&source, &target)?;
        if plan.is_empty() || dry_run {
            return Ok(plan);
        }

        plan.apply(&mut target);
        let rendered = serde_json::to_string_pretty(&Value::Object(target))?;
        fs::write(target_path, rendered)?;
        info!(
            path = %target_path.display(),
            changes = plan.changes.len(),
            "updated dev dependencies"
        );

        Ok(plan)
    }
}

fn dev_dependencies(fields: &ManifestFields) -> Option<&Map<String, Value>> {
    fields.get(DEV_DEPENDENCIES).and_then(|v| v.as_object())
}
