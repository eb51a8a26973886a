//! Tests for tree reconstruction from flat outline records

use rstest::rstest;

use varmap::outline::OutlineRecord;
use varmap::tree::{build_tree, flatten, leaf_count, NestingPolicy};

fn records(entries: &[(&str, &str, u32)]) -> Vec<OutlineRecord> {
    entries
        .iter()
        .map(|(name, position, level)| OutlineRecord::new(*name, *position, *level))
        .collect()
}

#[test]
fn given_flat_records_when_building_then_reconstructs_nested_tree() {
    // Arrange
    let input = records(&[
        ("Acme", "1", 1),
        ("Widget", "1.1", 2),
        ("Color", "1.1.1", 3),
        ("Red", "1.1.1.1", 4),
        ("Blue", "1.1.1.2", 4),
        ("Finish", "1.1.2", 3),
        ("Matte", "1.1.2.1", 4),
    ]);

    // Act
    let root = build_tree(input, NestingPolicy::OutlineLevel).unwrap();

    // Assert: Acme -> Widget -> {Color -> [Red, Blue], Finish -> [Matte]}
    assert_eq!(root.name, "Acme");
    let widget = &root.children[0];
    assert_eq!(widget.name, "Widget");
    assert_eq!(widget.children.len(), 2);

    let color = &widget.children[0];
    assert_eq!(
        color.leaf_names(),
        vec!["Red", "Blue"],
        "Color variants in document order"
    );
    let finish = &widget.children[1];
    assert_eq!(finish.leaf_names(), vec!["Matte"]);
}

#[rstest]
#[case::single(vec![("A", "1", 1)])]
#[case::chain(vec![("A", "1", 1), ("B", "1.1", 2), ("C", "1.1.1", 3)])]
#[case::siblings(vec![("A", "1", 1), ("B", "1.1", 2), ("C", "1.2", 2), ("D", "1.3", 2)])]
#[case::mixed(vec![
    ("A", "1", 1),
    ("B", "1.1", 2),
    ("C", "1.1.1", 3),
    ("D", "1.2", 2),
    ("E", "1.2.1", 3),
    ("F", "1.2.2", 3),
])]
fn given_wellformed_sequence_when_flattening_built_tree_then_round_trips(
    #[case] entries: Vec<(&str, &str, u32)>,
) {
    let input = records(&entries);

    let root = build_tree(input.clone(), NestingPolicy::OutlineLevel).unwrap();

    assert_eq!(flatten(&root), input);
}

#[rstest]
#[case::single(vec![("A", "1", 1)])]
#[case::siblings(vec![("A", "1", 1), ("B", "1.1", 2), ("C", "1.2", 2)])]
#[case::deep(vec![
    ("A", "1", 1),
    ("B", "1.1", 2),
    ("C", "1.1.1", 3),
    ("D", "1.2", 2),
])]
fn given_built_tree_when_counting_leaves_then_matches_sequence_invariant(
    #[case] entries: Vec<(&str, &str, u32)>,
) {
    let input = records(&entries);

    // Records followed by a record that is not strictly deeper are leaves,
    // and the final record is always a leaf.
    let expected = input
        .windows(2)
        .filter(|pair| pair[1].level <= pair[0].level)
        .count()
        + 1;

    let root = build_tree(input, NestingPolicy::OutlineLevel).unwrap();

    assert_eq!(leaf_count(&root), expected);
}

#[test]
fn given_empty_sequence_when_building_then_errors() {
    let result = build_tree(Vec::new(), NestingPolicy::OutlineLevel);
    assert!(result.is_err());
}

#[test]
fn given_both_policies_when_building_single_digit_outline_then_trees_agree() {
    let input = records(&[
        ("A", "1", 1),
        ("B", "1.1", 2),
        ("C", "1.1.1", 3),
        ("D", "1.2", 2),
    ]);

    let by_level = build_tree(input.clone(), NestingPolicy::OutlineLevel).unwrap();
    let by_position = build_tree(input, NestingPolicy::PositionLength).unwrap();

    assert_eq!(by_level, by_position);
}
