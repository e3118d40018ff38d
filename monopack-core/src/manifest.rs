//! Package manifest (`package.json`) reading.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// File name of an npm-style package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Manifest fields whose keys name the packages a package depends on.
pub const DEPENDENCY_FIELDS: [&str; 3] =
    ["dependencies", "peerDependencies", "optionalDependencies"];

/// Raw manifest content, keyed by field name.
pub type ManifestFields = Map<String, Value>;

/// Loads manifest content from a location.
///
/// Readers have no side effects. Implementations must fail with
/// [`Error::Read`] when the location is missing or not a structured object.
pub trait ManifestReader: Send + Sync {
    fn read(&self, location: &Path) -> Result<ManifestFields>;
}

/// Reads manifests as JSON files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileReader;

impl ManifestReader for JsonFileReader {
    fn read(&self, location: &Path) -> Result<ManifestFields> {
        let content = fs::read_to_string(location)
            .map_err(|e| Error::read(location, format!("cannot read file: {}", e)))?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| Error::read(location, format!("invalid JSON: {}", e)))?;

        match value {
            Value::Object(fields) => Ok(fields),
            _ => Err(Error::read(location, "manifest is not a JSON object")),
        }
    }
}

/// A named package as read from its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    /// Where the manifest was loaded from, kept verbatim.
    pub location: PathBuf,
    /// Union of regular, peer and optional dependency names.
    pub dependency_names: IndexSet<String>,
}

impl Manifest {
    pub fn new<I, S>(name: impl Into<String>, location: impl Into<PathBuf>, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            location: location.into(),
            dependency_names: deps.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a manifest from raw fields.
    ///
    /// Declaration fields that are missing or not objects contribute nothing.
    /// Version constraints are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if `name` is missing or not a string.
    pub fn from_fields(location: impl Into<PathBuf>, fields: &ManifestFields) -> Result<Self> {
        let location = location.into();
        let name = fields
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::read(&location, "missing string field 'name'"))?
            .to_string();

        let dependency_names = DEPENDENCY_FIELDS
            .iter()
            .filter_map(|field| fields.get(*field).and_then(|v| v.as_object()))
            .flat_map(|decls| decls.keys().cloned())
            .collect();

        Ok(Self {
            name,
            location,
            dependency_names,
        })
    }

    pub fn load<R: ManifestReader + ?Sized>(reader: &R, location: impl AsRef<Path>) -> Result<Self> {
        let location = location.as_ref();
        let fields = reader.read(location)?;
        Self::from_fields(location, &fields)
    }

    #[inline]
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependency_names.contains(name)
    }
}

/// Finds the nearest `package.json` at or above `start_dir`.
///
/// # Errors
///
/// Returns [`Error::ManifestNotFound`] when no ancestor holds a manifest.
pub fn find_manifest(start_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let start_dir = start_dir.as_ref();
    let mut current = Some(start_dir);

    while let Some(dir) = current {
        let candidate = dir.join(MANIFEST_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
        current = dir.parent();
    }

    Err(Error::ManifestNotFound(start_dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> ManifestFields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn collects_all_declaration_kinds_without_duplicates() {
        let raw = fields(json!({
            "name": "app",
            "dependencies": {"core": "^1.0.0", "util": "1.2.0"},
            "peerDependencies": {"core": "^1.0.0"},
            "optionalDependencies": {"fsevents": "*"},
            "devDependencies": {"mocha": "^10.0.0"}
        }));

        let manifest = Manifest::from_fields("app/package.json", &raw).unwrap();
        let names: Vec<&str> = manifest.dependency_names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["core", "util", "fsevents"]);
        assert!(!manifest.depends_on("mocha"));
    }

    #[test]
    fn non_object_declarations_are_ignored() {
        let raw = fields(json!({"name": "odd", "dependencies": ["core"]}));
        let manifest = Manifest::from_fields("odd/package.json", &raw).unwrap();
        assert!(manifest.dependency_names.is_empty());
    }

    #[test]
    fn missing_name_is_a_read_error() {
        let raw = fields(json!({"version": "1.0.0"}));
        let err = Manifest::from_fields("anon/package.json", &raw).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
