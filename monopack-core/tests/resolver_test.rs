use std::collections::HashMap;
use std::path::{Path, PathBuf};

use monopack_core::error::{Error, Result};
use monopack_core::manifest::{Manifest, ManifestFields, ManifestReader};
use monopack_core::resolver::Resolver;
use serde_json::{json, Value};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(format!("package_{}.json", name))
}

fn fixtures(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| fixture(n)).collect()
}

/// Serves manifests from memory, keyed by location.
struct MemoryReader {
    manifests: HashMap<PathBuf, Value>,
}

impl MemoryReader {
    fn new(entries: Vec<(&str, Value)>) -> Self {
        Self {
            manifests: entries
                .into_iter()
                .map(|(location, value)| (PathBuf::from(location), value))
                .collect(),
        }
    }
}

impl ManifestReader for MemoryReader {
    fn read(&self, location: &Path) -> Result<ManifestFields> {
        self.manifests
            .get(location)
            .and_then(|v| v.as_object().cloned())
            .ok_or_else(|| Error::Read {
                location: location.to_path_buf(),
                message: "not found".to_string(),
            })
    }
}

fn paths(locations: &[&str]) -> Vec<PathBuf> {
    locations.iter().map(PathBuf::from).collect()
}

#[test]
fn test_sort_by_name_keeps_input_order() {
    let ordered = Resolver::new().resolve(&fixtures(&["d01", "d02"])).unwrap();
    assert_eq!(ordered, fixtures(&["d01", "d02"]));
}

#[test]
fn test_sort_by_dependency() {
    let ordered = Resolver::new().resolve(&fixtures(&["d03", "d02"])).unwrap();
    assert_eq!(ordered, fixtures(&["d02", "d03"]));
}

#[test]
fn test_sort_by_chained_dependencies_in_any_input_order() {
    let expected = fixtures(&["d02", "d03", "d04"]);
    let permutations = [
        ["d04", "d03", "d02"],
        ["d04", "d02", "d03"],
        ["d02", "d03", "d04"],
        ["d03", "d02", "d04"],
        ["d03", "d04", "d02"],
        ["d02", "d04", "d03"],
    ];

    for input in permutations {
        let ordered = Resolver::new().resolve(&fixtures(&input)).unwrap();
        assert_eq!(ordered, expected, "input order {:?}", input);
    }
}

#[test]
fn test_empty_input() {
    let ordered = Resolver::new().resolve(&[]).unwrap();
    assert!(ordered.is_empty());
}

#[test]
fn test_single_entry() {
    let ordered = Resolver::new().resolve(&fixtures(&["d01"])).unwrap();
    assert_eq!(ordered, fixtures(&["d01"]));
}

#[test]
fn test_missing_manifest_aborts_resolution() {
    let mut input = fixtures(&["d01", "d02"]);
    input.push(PathBuf::from("/definitely/not/here/package.json"));

    let result = Resolver::new().resolve(&input);
    assert!(matches!(result, Err(Error::Read { .. })));
}

#[test]
fn test_cycle_terminates_with_all_packages() {
    let reader = MemoryReader::new(vec![
        ("a", json!({"name": "a", "dependencies": {"b": "1"}})),
        ("b", json!({"name": "b", "peerDependencies": {"a": "1"}})),
        ("c", json!({"name": "c", "optionalDependencies": {"a": "1"}})),
    ]);

    let ordered = Resolver::with_reader(reader)
        .resolve(&paths(&["a", "b", "c"]))
        .unwrap();
    assert_eq!(ordered, paths(&["a", "b", "c"]));
}

#[test]
fn test_cycle_members_force_placed_in_queue_order() {
    let reader = MemoryReader::new(vec![
        ("x", json!({"name": "x", "dependencies": {"y": "1"}})),
        ("y", json!({"name": "y", "dependencies": {"x": "1"}})),
        ("app", json!({"name": "app", "dependencies": {"x": "1"}})),
    ]);

    let ordered = Resolver::with_reader(reader)
        .with_retry_budget(3)
        .resolve(&paths(&["x", "y", "app"]))
        .unwrap();
    assert_eq!(ordered, paths(&["x", "y", "app"]));
}

#[test]
fn test_unknown_dependencies_count_as_resolved() {
    let reader = MemoryReader::new(vec![
        ("web", json!({"name": "web", "dependencies": {"react": "^18.0.0", "ui": "*"}})),
        ("ui", json!({"name": "ui", "dependencies": {"react": "^18.0.0"}})),
    ]);

    let ordered = Resolver::with_reader(reader)
        .resolve(&paths(&["web", "ui"]))
        .unwrap();
    assert_eq!(ordered, paths(&["ui", "web"]));
}

#[test]
fn test_independent_packages_follow_input_order() {
    let reader = || {
        MemoryReader::new(vec![
            ("x", json!({"name": "x"})),
            ("y", json!({"name": "y"})),
            ("base", json!({"name": "base"})),
            ("top", json!({"name": "top", "dependencies": {"base": "1"}})),
        ])
    };

    let first = Resolver::with_reader(reader())
        .resolve(&paths(&["top", "x", "y", "base"]))
        .unwrap();
    let swapped = Resolver::with_reader(reader())
        .resolve(&paths(&["top", "y", "x", "base"]))
        .unwrap();

    assert_eq!(first, paths(&["x", "y", "base", "top"]));
    assert_eq!(swapped, paths(&["y", "x", "base", "top"]));
}

#[test]
fn test_exhausted_budget_degrades_order() {
    let resolver = Resolver::new().with_retry_budget(1);
    let ordered = resolver.resolve_manifests(vec![
        Manifest::new("c", "c", ["b"]),
        Manifest::new("b", "b", ["a"]),
        Manifest::new("a", "a", Vec::<String>::new()),
    ]);

    let names: Vec<&str> = ordered.iter().map(|m| m.name.as_str()).collect();
    // "c" runs out of retries while "b" is still queued.
    assert_eq!(names, vec!["a", "c", "b"]);
}

#[test]
fn test_locations_are_preserved_verbatim() {
    let reader = MemoryReader::new(vec![
        ("./packages/core/package.json", json!({"name": "core"})),
        (
            "./packages/cli/package.json",
            json!({"name": "cli", "dependencies": {"core": "1"}}),
        ),
    ]);

    let input = paths(&["./packages/cli/package.json", "./packages/core/package.json"]);
    let ordered = Resolver::with_reader(reader).resolve(&input).unwrap();
    assert_eq!(
        ordered,
        paths(&["./packages/core/package.json", "./packages/cli/package.json"])
    );
}
