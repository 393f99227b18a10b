//! Tests for root-level filtering

use rstest::rstest;

use wmsloc::domain::{
    apply, build_forest, filter_roots, FilterCriteria, LocationForest, LocationKind,
    LocationRecord,
};

fn forest() -> LocationForest {
    let records = vec![
        LocationRecord::new("1", "Stock", "WH", LocationKind::View).with_qualified_name("WH/Stock"),
        LocationRecord::new("2", "Receiving", "WH", LocationKind::Internal).with_parent("1"),
        LocationRecord::new("10", "Cross Dock", "WH", LocationKind::Internal)
            .with_qualified_name("WH/Cross Dock"),
        LocationRecord::new("11", "Quarantine", "WH2", LocationKind::Internal)
            .with_qualified_name("WH2/Quarantine"),
        LocationRecord::new("20", "Vendors", "", LocationKind::Vendor)
            .with_qualified_name("Partners/Vendors"),
        LocationRecord::new("21", "Customers", "", LocationKind::Customer)
            .with_qualified_name("Partners/Customers"),
        LocationRecord::new("30", "In Transit", "WH", LocationKind::Transit),
    ];
    build_forest(&records).unwrap()
}

fn ids(nodes: &[&wmsloc::domain::TreeNode]) -> Vec<String> {
    nodes.iter().map(|n| n.record.id.clone()).collect()
}

#[test]
fn given_no_criteria_when_applying_then_returns_all_roots_in_order() {
    let forest = forest();

    let roots = apply(&forest, &FilterCriteria::new());

    assert_eq!(ids(&roots), forest.root_ids());
}

#[test]
fn given_warehouse_criteria_when_applying_then_keeps_matching_roots() {
    let forest = forest();

    let roots = apply(&forest, &FilterCriteria::new().with_warehouse("WH"));

    assert_eq!(ids(&roots), vec!["10", "30", "1"]);
}

#[test]
fn given_search_matching_only_child_when_applying_then_root_dropped() {
    // Root-only filtering: "Receiving" is a child of "Stock"
    let forest = forest();

    let roots = apply(&forest, &FilterCriteria::new().with_search("receiv"));

    assert!(roots.is_empty());
}

#[test]
fn given_search_matching_qualified_name_when_applying_then_root_kept() {
    let forest = forest();

    let roots = apply(&forest, &FilterCriteria::new().with_search("PARTNERS"));

    assert_eq!(ids(&roots), vec!["21", "20"]);
}

#[rstest]
#[case(LocationKind::Internal, "o")]
#[case(LocationKind::Internal, "a")]
#[case(LocationKind::Vendor, "vend")]
#[case(LocationKind::Transit, "zzz")]
#[case(LocationKind::View, "st")]
fn given_kind_and_search_when_applying_then_equals_sequential_filters(
    #[case] kind: LocationKind,
    #[case] search: &str,
) {
    // Arrange
    let forest = forest();
    let combined = FilterCriteria::new().with_kind(kind).with_search(search);
    let by_kind = FilterCriteria::new().with_kind(kind);
    let by_search = FilterCriteria::new().with_search(search);

    // Act
    let at_once = apply(&forest, &combined);
    let sequential = filter_roots(apply(&forest, &by_kind), &by_search);

    // Assert
    assert_eq!(ids(&at_once), ids(&sequential));
}

#[test]
fn given_all_selectors_when_applying_then_unconstrained() {
    let forest = forest();
    let criteria = FilterCriteria::new()
        .with_warehouse("all")
        .with_kind_str("all")
        .unwrap();

    let roots = apply(&forest, &criteria);

    assert_eq!(roots.len(), forest.roots().len());
}

#[test]
fn given_conjunction_with_no_overlap_when_applying_then_empty() {
    let forest = forest();
    let criteria = FilterCriteria::new()
        .with_warehouse("WH2")
        .with_kind(LocationKind::Vendor);

    assert!(apply(&forest, &criteria).is_empty());
}

#[test]
fn given_struct_literal_with_all_warehouse_when_applying_then_keeps_every_root() {
    // Arrange
    let forest = forest();
    let criteria = FilterCriteria {
        warehouse_id: Some("all".into()),
        ..Default::default()
    };

    // Act
    let roots = apply(&forest, &criteria);

    // Assert
    assert_eq!(ids(&roots), forest.root_ids());
}
