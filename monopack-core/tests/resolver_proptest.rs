use std::collections::{HashMap, HashSet};

use monopack_core::manifest::Manifest;
use monopack_core::resolver::Resolver;
use proptest::prelude::*;

fn build_manifests(matrix: &[Vec<bool>], acyclic: bool) -> Vec<Manifest> {
    let n = matrix.len();
    (0..n)
        .map(|i| {
            let deps: Vec<String> = (0..n)
                .filter(|&j| matrix[i][j] && (!acyclic || j < i))
                .map(|j| format!("pkg-{}", j))
                .collect();
            Manifest::new(format!("pkg-{}", i), format!("pkg-{}/package.json", i), deps)
        })
        .collect()
}

fn gen_manifests(acyclic: bool) -> impl Strategy<Value = Vec<Manifest>> {
    (0usize..8).prop_flat_map(move |n| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), n), n)
            .prop_map(move |matrix| build_manifests(&matrix, acyclic))
            .prop_shuffle()
    })
}

proptest! {
    #[test]
    fn test_output_is_permutation_of_input(manifests in gen_manifests(false)) {
        let input: Vec<String> = manifests.iter().map(|m| m.name.clone()).collect();
        let ordered = Resolver::new().resolve_manifests(manifests);

        prop_assert_eq!(ordered.len(), input.len());
        let mut seen = HashSet::new();
        for manifest in &ordered {
            prop_assert!(seen.insert(manifest.name.clone()), "Duplicate package in order: {}", manifest.name);
        }
        prop_assert!(input.iter().all(|name| seen.contains(name)));
    }

    #[test]
    fn test_dependencies_precede_dependents(manifests in gen_manifests(true)) {
        let ordered = Resolver::new().resolve_manifests(manifests);
        let position: HashMap<&str, usize> = ordered
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.name.as_str(), idx))
            .collect();

        for manifest in &ordered {
            for dep in &manifest.dependency_names {
                prop_assert!(
                    position[dep.as_str()] < position[manifest.name.as_str()],
                    "{} placed before its dependency {}", manifest.name, dep
                );
            }
        }
    }
}
