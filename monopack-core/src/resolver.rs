//! Build/publish ordering of packages by their dependencies.
//!
//! The resolver is a cycle-tolerant relaxation of a topological sort. Entries
//! wait in a FIFO queue while any of their dependencies is still queued, and
//! each entry may only be deferred a bounded number of times. Once that budget
//! is spent the entry is placed regardless, so cyclic package sets always
//! produce an order instead of an error.
//!
//! Resolution time for a deeply cyclic set grows with
//! `retry_budget × package count`.

use std::collections::VecDeque;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::manifest::{JsonFileReader, Manifest, ManifestReader};

/// Number of times an entry may be deferred before it is force-placed.
pub const DEFAULT_RETRY_BUDGET: u32 = 20;

#[derive(Debug)]
struct ResolutionEntry {
    manifest: Manifest,
    remaining_retries: i64,
}

/// Orders manifest locations so that dependencies come before dependents.
#[derive(Debug, Clone)]
pub struct Resolver<R = JsonFileReader> {
    reader: R,
    retry_budget: u32,
}

impl Default for Resolver<JsonFileReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver<JsonFileReader> {
    pub fn new() -> Self {
        Self::with_reader(JsonFileReader)
    }
}

impl<R: ManifestReader> Resolver<R> {
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }

    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    #[inline]
    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    /// Returns `locations` reordered so no package precedes one of its
    /// dependencies, except where a dependency cycle forced a placement.
    ///
    /// The output always holds exactly the input locations.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Read`] if any manifest cannot be loaded. No
    /// partial order is produced in that case.
    pub fn resolve(&self, locations: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let manifests = self.load_all(locations)?;
        Ok(self
            .resolve_manifests(manifests)
            .into_iter()
            .map(|m| m.location)
            .collect())
    }

    /// Loads all manifests, preserving input order.
    ///
    /// Loads are independent and read-only, so they run in parallel.
    pub fn load_all(&self, locations: &[PathBuf]) -> Result<Vec<Manifest>> {
        locations
            .par_iter()
            .map(|location| Manifest::load(&self.reader, location))
            .collect()
    }

    /// Orders already loaded manifests.
    pub fn resolve_manifests(&self, manifests: Vec<Manifest>) -> Vec<Manifest> {
        let mut queue: VecDeque<ResolutionEntry> = manifests
            .into_iter()
            .map(|manifest| ResolutionEntry {
                manifest,
                remaining_retries: i64::from(self.retry_budget),
            })
            .collect();
        let mut ordered = Vec::with_capacity(queue.len());

        debug!(
            packages = queue.len(),
            retry_budget = self.retry_budget,
            "resolving package order"
        );

        while let Some(mut entry) = queue.pop_front() {
            entry.remaining_retries -= 1;

            if entry.remaining_retries < 0 {
                warn!(
                    package = %entry.manifest.name,
                    "retry budget exhausted, placing package despite unresolved dependencies"
                );
                ordered.push(entry.manifest);
                continue;
            }

            let pending = queue
                .iter()
                .find(|queued| entry.manifest.depends_on(&queued.manifest.name))
                .map(|queued| queued.manifest.name.clone());

            match pending {
                Some(dep) => {
                    trace!(package = %entry.manifest.name, waiting_on = %dep, "deferring");
                    queue.push_back(entry);
                }
                None => ordered.push(entry.manifest),
            }
        }

        ordered
    }
}
