//! Discovery of sub-packages inside a packages directory.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::manifest::{Manifest, ManifestReader, MANIFEST_FILE};

/// Scans a directory for sub-packages.
///
/// Every immediate child directory holding a `package.json` is a package.
pub struct Scanner {
    packages_dir: PathBuf,
}

impl Scanner {
    pub fn new(packages_dir: impl AsRef<Path>) -> Self {
        Self {
            packages_dir: packages_dir.as_ref().to_path_buf(),
        }
    }

    #[inline]
    pub fn packages_dir(&self) -> &Path {
        &self.packages_dir
    }

    /// Returns manifest paths sorted by path.
    ///
    /// A missing packages directory holds no packages.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.packages_dir.is_dir() {
            debug!(dir = %self.packages_dir.display(), "packages directory does not exist");
            return Ok(Vec::new());
        }

        let mut manifests: Vec<PathBuf> = WalkDir::new(&self.packages_dir)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && e.file_name() == MANIFEST_FILE)
            .map(|e| e.path().to_path_buf())
            .collect();

        manifests.sort();
        debug!(
            dir = %self.packages_dir.display(),
            found = manifests.len(),
            "scanned packages"
        );
        Ok(manifests)
    }

    /// Scans and loads every discovered manifest, in path order.
    pub fn scan_manifests<R: ManifestReader>(&self, reader: &R) -> Result<Vec<Manifest>> {
        self.scan()?
            .into_par_iter()
            .map(|location| Manifest::load(reader, location))
            .collect()
    }
}
