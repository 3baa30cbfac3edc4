//! Dependency resolution.
//!
//! Orders an unordered collection of schema descriptors so that every
//! descriptor comes after the tables it declares dependencies on. Pure
//! and synchronous: the same input always produces the same order.

use indexmap::IndexMap;

use crate::schema::SchemaDescriptor;
use crate::{Error, Result};

/// Topologically order `schemas` by their declared dependencies.
///
/// Every input descriptor appears exactly once in the output. For a
/// descriptor depending on table `t`, the descriptor for `t` (when
/// present in the input) sorts strictly earlier. Descriptors with no
/// relative constraint keep their input order, so runs are reproducible.
///
/// A dependency naming a table outside the input set is treated as
/// already satisfied; the synchronizer's per-table existence probe is
/// the only place external state is consulted.
pub fn resolve(schemas: &[SchemaDescriptor]) -> Result<Vec<&SchemaDescriptor>> {
    let mut by_name: IndexMap<&str, usize> = IndexMap::with_capacity(schemas.len());
    for (idx, schema) in schemas.iter().enumerate() {
        if schema.table_name.is_empty() {
            return Err(Error::EmptyTableName);
        }
        if by_name.insert(schema.table_name.as_str(), idx).is_some() {
            return Err(Error::DuplicateSchema {
                table: schema.table_name.clone(),
            });
        }
    }

    let mut placed = vec![false; schemas.len()];
    let mut ordered = Vec::with_capacity(schemas.len());

    while ordered.len() < schemas.len() {
        let mut progressed = false;
        for (idx, schema) in schemas.iter().enumerate() {
            if placed[idx] {
                continue;
            }
            let ready = schema.dependencies.iter().all(|dep| {
                by_name
                    .get(dep.as_str())
                    .is_none_or(|&dep_idx| placed[dep_idx])
            });
            if ready {
                placed[idx] = true;
                ordered.push(schema);
                progressed = true;
            }
        }
        if !progressed {
            return Err(Error::CyclicDependency {
                table: cycle_member(schemas, &by_name, &placed),
            });
        }
    }

    Ok(ordered)
}

/// Find a table that lies on a dependency cycle among the unplaced
/// descriptors.
///
/// Every unplaced descriptor has at least one unplaced dependency inside
/// the input set, so following those edges must eventually revisit a
/// node; the first node visited twice lies on the cycle.
fn cycle_member(
    schemas: &[SchemaDescriptor],
    by_name: &IndexMap<&str, usize>,
    placed: &[bool],
) -> String {
    let mut cur = match placed.iter().position(|&p| !p) {
        Some(idx) => idx,
        None => return String::new(),
    };
    let mut seen = vec![false; schemas.len()];
    loop {
        if seen[cur] {
            return schemas[cur].table_name.clone();
        }
        seen[cur] = true;
        let next = schemas[cur].dependencies.iter().find_map(|dep| {
            by_name
                .get(dep.as_str())
                .copied()
                .filter(|&dep_idx| !placed[dep_idx])
        });
        match next {
            Some(idx) => cur = idx,
            None => return schemas[cur].table_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(ordered: &[&SchemaDescriptor]) -> Vec<String> {
        ordered.iter().map(|s| s.table_name.clone()).collect()
    }

    #[test]
    fn test_no_dependencies_keeps_input_order() {
        let schemas = vec![
            SchemaDescriptor::new("c"),
            SchemaDescriptor::new("a"),
            SchemaDescriptor::new("b"),
        ];
        let ordered = resolve(&schemas).unwrap();
        assert_eq!(names(&ordered), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_dependency_sorts_earlier() {
        let schemas = vec![
            SchemaDescriptor::new("second").depends_on(["first"]),
            SchemaDescriptor::new("first"),
        ];
        let ordered = resolve(&schemas).unwrap();
        assert_eq!(names(&ordered), vec!["first", "second"]);
    }

    #[test]
    fn test_chain() {
        let schemas = vec![
            SchemaDescriptor::new("c").depends_on(["b"]),
            SchemaDescriptor::new("b").depends_on(["a"]),
            SchemaDescriptor::new("a"),
        ];
        let ordered = resolve(&schemas).unwrap();
        assert_eq!(names(&ordered), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_dependency_is_satisfied() {
        let schemas = vec![
            SchemaDescriptor::new("b").depends_on(["not_in_this_run"]),
            SchemaDescriptor::new("a"),
        ];
        let ordered = resolve(&schemas).unwrap();
        assert_eq!(names(&ordered), vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_table_name() {
        let schemas = vec![SchemaDescriptor::new("a"), SchemaDescriptor::new("a")];
        match resolve(&schemas) {
            Err(Error::DuplicateSchema { table }) => assert_eq!(table, "a"),
            other => panic!("expected DuplicateSchema, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_table_name() {
        let schemas = vec![SchemaDescriptor::new("")];
        assert!(matches!(resolve(&schemas), Err(Error::EmptyTableName)));
    }

    #[test]
    fn test_two_node_cycle() {
        let schemas = vec![
            SchemaDescriptor::new("a").depends_on(["b"]),
            SchemaDescriptor::new("b").depends_on(["a"]),
        ];
        match resolve(&schemas) {
            Err(Error::CyclicDependency { table }) => {
                assert!(table == "a" || table == "b");
            }
            other => panic!("expected CyclicDependency, got {other:?}"),
        }
    }

    #[test]
    fn test_self_cycle() {
        let schemas = vec![SchemaDescriptor::new("a").depends_on(["a"])];
        match resolve(&schemas) {
            Err(Error::CyclicDependency { table }) => assert_eq!(table, "a"),
            other => panic!("expected CyclicDependency, got {other:?}"),
        }
    }

    #[test]
    fn test_cycle_reported_table_is_on_the_cycle() {
        // c hangs off the a <-> b cycle; it must not be reported
        let schemas = vec![
            SchemaDescriptor::new("c").depends_on(["a"]),
            SchemaDescriptor::new("a").depends_on(["b"]),
            SchemaDescriptor::new("b").depends_on(["a"]),
        ];
        match resolve(&schemas) {
            Err(Error::CyclicDependency { table }) => {
                assert!(table == "a" || table == "b", "got '{table}'");
            }
            other => panic!("expected CyclicDependency, got {other:?}"),
        }
    }

    #[test]
    fn test_diamond() {
        let schemas = vec![
            SchemaDescriptor::new("d").depends_on(["b", "c"]),
            SchemaDescriptor::new("b").depends_on(["a"]),
            SchemaDescriptor::new("c").depends_on(["a"]),
            SchemaDescriptor::new("a"),
        ];
        let ordered = resolve(&schemas).unwrap();
        assert_eq!(names(&ordered), vec!["a", "b", "c", "d"]);
    }

    /// Random DAGs: node `i` may depend on nodes with smaller indices,
    /// then the whole collection is shuffled.
    fn acyclic_schemas() -> impl Strategy<Value = Vec<SchemaDescriptor>> {
        (1usize..10)
            .prop_flat_map(|n| {
                let deps: Vec<_> = (0..n)
                    .map(|i| {
                        if i == 0 {
                            Just(std::collections::BTreeSet::new()).boxed()
                        } else {
                            proptest::collection::btree_set(0..i, 0..=i.min(3)).boxed()
                        }
                    })
                    .collect();
                let order = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
                (deps, order)
            })
            .prop_map(|(deps_by_node, order)| {
                order
                    .into_iter()
                    .map(|i| {
                        SchemaDescriptor::new(format!("t{i}"))
                            .depends_on(deps_by_node[i].iter().map(|d| format!("t{d}")))
                    })
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn prop_acyclic_graphs_resolve(schemas in acyclic_schemas()) {
            let ordered = resolve(&schemas).unwrap();

            // permutation: every input exactly once
            prop_assert_eq!(ordered.len(), schemas.len());
            let mut got = names(&ordered);
            got.sort();
            let mut expected: Vec<_> =
                schemas.iter().map(|s| s.table_name.clone()).collect();
            expected.sort();
            prop_assert_eq!(got, expected);

            // every present dependency precedes its dependent
            for (pos, schema) in ordered.iter().enumerate() {
                for dep in &schema.dependencies {
                    if let Some(dep_pos) =
                        ordered.iter().position(|s| &s.table_name == dep)
                    {
                        prop_assert!(dep_pos < pos, "{} at {} after {} at {}",
                            dep, dep_pos, schema.table_name, pos);
                    }
                }
            }
        }

        #[test]
        fn prop_resolution_is_deterministic(schemas in acyclic_schemas()) {
            let first = names(&resolve(&schemas).unwrap());
            let second = names(&resolve(&schemas).unwrap());
            prop_assert_eq!(first, second);
        }
    }
}
