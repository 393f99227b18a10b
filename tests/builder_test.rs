//! Tests for TreeBuilder

use rstest::rstest;

use wmsloc::domain::{build_forest, DomainError, LocationKind, LocationRecord, TreeBuilder};
use wmsloc::util::testing;

fn loc(id: &str, name: &str, parent: Option<&str>) -> LocationRecord {
    let record = LocationRecord::new(id, name, "WH", LocationKind::Internal);
    match parent {
        Some(p) => record.with_parent(p),
        None => record,
    }
}

/// Example store: "Stock" with two children and a scrap bin whose parent "99" is missing.
fn example_records() -> Vec<LocationRecord> {
    vec![
        LocationRecord::new("1", "Stock", "WH", LocationKind::View),
        LocationRecord::new("2", "Receiving", "WH", LocationKind::Internal).with_parent("1"),
        LocationRecord::new("3", "Aisle A", "WH", LocationKind::Internal).with_parent("1"),
        LocationRecord::new("8", "Damaged", "WH", LocationKind::Internal)
            .with_parent("99")
            .scrap(),
    ]
}

fn child_names(forest: &wmsloc::domain::LocationForest, id: &str) -> Vec<String> {
    forest
        .find(id)
        .unwrap()
        .children
        .iter()
        .map(|&idx| forest.get_node(idx).unwrap().record.name.clone())
        .collect()
}

#[test]
fn given_example_records_when_building_then_creates_two_sorted_roots() {
    // Arrange
    testing::init_test_setup();
    let records = example_records();

    // Act
    let forest = build_forest(&records).unwrap();

    // Assert
    let roots: Vec<&str> = forest.root_nodes().map(|n| n.record.name.as_str()).collect();
    assert_eq!(roots, vec!["Damaged", "Stock"]);
    assert!(forest.root_nodes().all(|n| n.depth == 0));
    assert_eq!(child_names(&forest, "1"), vec!["Aisle A", "Receiving"]);
    assert_eq!(forest.find("2").unwrap().depth, 1);
    assert_eq!(forest.orphan_ids(), ["8".to_string()]);
}

#[test]
fn given_empty_input_when_building_then_returns_empty_forest() {
    // Act
    let forest = build_forest(&[]).unwrap();

    // Assert
    assert!(forest.is_empty());
    assert!(forest.roots().is_empty());
    assert_eq!(forest.max_depth(), 0);
}

#[test]
fn given_duplicate_ids_when_building_then_names_offending_id() {
    // Arrange
    let records = vec![
        loc("1", "Stock", None),
        loc("2", "Receiving", Some("1")),
        loc("2", "Shipping", Some("1")),
    ];

    // Act
    let result = build_forest(&records);

    // Assert
    assert_eq!(
        result.unwrap_err(),
        DomainError::DuplicateIdentifier("2".to_string())
    );
}

#[test]
fn given_two_node_cycle_when_building_then_errors() {
    // Arrange
    let records = vec![
        loc("root", "Root", None),
        loc("a", "A", Some("b")),
        loc("b", "B", Some("a")),
    ];

    // Act
    let result = build_forest(&records);

    // Assert
    assert_eq!(
        result.unwrap_err(),
        DomainError::CyclicHierarchy("a".to_string())
    );
}

#[test]
fn given_only_cyclic_records_when_building_then_errors() {
    let records = vec![
        loc("a", "A", Some("c")),
        loc("b", "B", Some("a")),
        loc("c", "C", Some("b")),
    ];

    let err = build_forest(&records).unwrap_err();

    assert!(matches!(err, DomainError::CyclicHierarchy(_)));
}

#[rstest]
#[case(vec!["beta", "Alpha", "gamma"], vec!["Alpha", "beta", "gamma"])]
#[case(vec!["Zone b", "zone A", "ZONE c"], vec!["zone A", "Zone b", "ZONE c"])]
#[case(vec!["bin", "Bin", "BIN"], vec!["bin", "Bin", "BIN"])]
fn given_siblings_when_building_then_sorted_case_insensitively(
    #[case] names: Vec<&str>,
    #[case] expected: Vec<&str>,
) {
    // Arrange: ids follow input order, so equal names tie-break by input position
    let mut records = vec![loc("p", "Parent", None)];
    for (i, name) in names.iter().enumerate() {
        records.push(loc(&format!("c{}", i), name, Some("p")));
    }

    // Act
    let forest = build_forest(&records).unwrap();

    // Assert
    assert_eq!(child_names(&forest, "p"), expected);
}

#[test]
fn given_equal_names_when_building_then_ties_broken_by_id() {
    // Arrange
    let records = vec![loc("b", "Shelf", None), loc("a", "shelf", None)];

    // Act
    let forest = build_forest(&records).unwrap();

    // Assert
    assert_eq!(forest.root_ids(), vec!["a", "b"]);
}

#[test]
fn given_deep_chain_when_building_then_depth_follows_parents() {
    // Arrange: records listed leaf first
    let records = vec![
        loc("bin", "Bin", Some("shelf")),
        loc("shelf", "Shelf", Some("aisle")),
        loc("aisle", "Aisle", Some("stock")),
        loc("stock", "Stock", None),
    ];

    // Act
    let forest = build_forest(&records).unwrap();

    // Assert
    assert_eq!(forest.find("stock").unwrap().depth, 0);
    assert_eq!(forest.find("aisle").unwrap().depth, 1);
    assert_eq!(forest.find("shelf").unwrap().depth, 2);
    assert_eq!(forest.find("bin").unwrap().depth, 3);
    assert_eq!(forest.max_depth(), 4);
    assert_eq!(forest.leaf_ids(), vec!["bin"]);
}

#[test]
fn given_builder_when_building_twice_then_results_match() {
    let mut builder = TreeBuilder::new();

    let first = builder.build(&example_records()).unwrap();
    let second = builder.build(&example_records()).unwrap();

    assert_eq!(first.outline(), second.outline());
}
