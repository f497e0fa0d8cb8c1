//! Integration tests for goal tree construction from a question catalog.

use goaltree::domain::{build_tree, QuestionCatalog, Status, TreeBuilder};

fn catalog(axes: &[(&str, &[&str])]) -> QuestionCatalog {
    QuestionCatalog::from_axes(axes.iter().map(|(axis, questions)| {
        (
            axis.to_string(),
            questions.iter().map(|q| q.to_string()).collect(),
        )
    }))
}

#[test]
fn given_one_goal_and_one_question_when_building_then_three_linked_nodes() {
    // Arrange
    let catalog = catalog(&[("Process", &["Q1"])]);

    // Act
    let nodes = build_tree(["Goal1"], &catalog);

    // Assert
    assert_eq!(nodes.len(), 3);
    let (root, axis, leaf) = (&nodes[0], &nodes[1], &nodes[2]);
    assert_eq!(root.name, "Goal1");
    assert_eq!(root.parent, None);
    assert_eq!(axis.name, "Process");
    assert_eq!(axis.parent.as_deref(), Some(root.id.as_str()));
    assert_eq!(leaf.name, "Q1");
    assert_eq!(leaf.parent.as_deref(), Some(axis.id.as_str()));
    assert!(nodes.iter().all(|n| n.status == Status::Yellow));
}

#[test]
fn given_multiple_goals_when_building_then_each_gets_full_template_in_order() {
    let catalog = catalog(&[("Process", &["Q1", "Q2"]), ("People", &[])]);

    let nodes = build_tree(["Goal A", "Goal B"], &catalog);

    let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Goal A", "Process", "Q1", "Q2", "People", "Goal B", "Process", "Q1", "Q2", "People"]
    );
    // People of goal B hangs under goal B
    assert_eq!(nodes[9].parent.as_deref(), Some(nodes[5].id.as_str()));
}

#[test]
fn given_blank_and_padded_goals_when_building_then_blank_skipped_and_trimmed() {
    let catalog = QuestionCatalog::fallback();

    let nodes = build_tree(["  Ship v2  ", "", "   "], &catalog);

    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[0].name, "Ship v2");
    let axes: Vec<&str> = nodes[1..].iter().map(|n| n.name.as_str()).collect();
    assert_eq!(axes, vec!["Process", "System", "People"]);
}

#[test]
fn given_identical_goal_texts_when_building_then_independent_trees() {
    let catalog = catalog(&[("Process", &[])]);

    let nodes = build_tree(["Same", "Same"], &catalog);

    assert_eq!(nodes.len(), 4);
    assert_ne!(nodes[0].id, nodes[2].id);
    assert_eq!(nodes[3].parent.as_deref(), Some(nodes[2].id.as_str()));
}

#[test]
fn given_outline_catalog_when_building_then_nesting_is_preserved() {
    // Arrange
    let outline = QuestionCatalog::parse_outline(
        "Process:\n  - Documented?\n  - Tooling:\n      - CI in place?\nPeople:\n",
    );
    let builder = TreeBuilder::new(outline);

    // Act
    let nodes = builder.build(["Goal"]);

    // Assert
    let by_name = |name: &str| nodes.iter().find(|n| n.name == name).unwrap();
    assert_eq!(nodes.len(), 6);
    assert_eq!(by_name("Process").parent.as_deref(), Some(nodes[0].id.as_str()));
    assert_eq!(
        by_name("CI in place?").parent.as_deref(),
        Some(by_name("Tooling").id.as_str())
    );
    assert_eq!(by_name("People").parent.as_deref(), Some(nodes[0].id.as_str()));
}
