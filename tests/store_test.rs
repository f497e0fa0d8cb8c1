//! Integration tests for manual editing of the node collection.

use goaltree::domain::forest::Forest;
use goaltree::domain::{DomainError, NodeStore, NodeUpdate, Status};

#[test]
fn given_store_when_adding_root_and_child_then_linked_and_yellow() {
    // Arrange
    let mut store = NodeStore::new();

    // Act
    let goal = store.add_root("  Goal  ").unwrap();
    let axis = store.add_child(&goal, "Process").unwrap();

    // Assert
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&goal).unwrap().name, "Goal");
    assert_eq!(store.get(&axis).unwrap().parent.as_deref(), Some(goal.as_str()));
    assert_eq!(store.get(&axis).unwrap().status, Status::Yellow);
    assert!(store.is_parent(&goal));
    assert!(!store.is_parent(&axis));
}

#[test]
fn given_unknown_parent_when_adding_child_then_not_found() {
    let mut store = NodeStore::new();

    let result = store.add_child("nope", "Orphan");

    assert_eq!(result, Err(DomainError::NodeNotFound("nope".into())));
    assert!(store.is_empty());
}

#[test]
fn given_blank_name_when_adding_then_rejected() {
    let mut store = NodeStore::new();

    assert_eq!(store.add_root("   "), Err(DomainError::EmptyName));
}

#[test]
fn given_partial_update_when_editing_then_only_given_fields_change() {
    // Arrange
    let mut store = NodeStore::new();
    let goal = store.add_root("Goal").unwrap();

    // Act
    store
        .update(
            &goal,
            NodeUpdate {
                status: Some(Status::Red),
                comment: Some("vendor late".into()),
                ..Default::default()
            },
        )
        .unwrap();

    // Assert
    let node = store.get(&goal).unwrap();
    assert_eq!(node.name, "Goal");
    assert_eq!(node.status, Status::Red);
    assert_eq!(node.comment, "vendor late");
}

#[test]
fn given_unknown_id_when_editing_then_not_found() {
    let mut store = NodeStore::new();

    let result = store.update("missing", NodeUpdate::default());

    assert_eq!(result.unwrap_err(), DomainError::NodeNotFound("missing".into()));
}

#[test]
fn given_parent_with_children_when_removing_then_children_kept_with_dangling_parent() {
    // Arrange
    let mut store = NodeStore::new();
    let goal = store.add_root("Goal").unwrap();
    let axis = store.add_child(&goal, "Process").unwrap();
    let question = store.add_child(&axis, "Q1").unwrap();

    // Act
    let removed = store.remove(&axis).unwrap();

    // Assert
    assert_eq!(removed.name, "Process");
    assert_eq!(store.len(), 2);
    let orphan = store.get(&question).unwrap();
    assert_eq!(orphan.parent.as_deref(), Some(axis.as_str()));
    assert_eq!(store.dangling().len(), 1);
}

#[test]
fn given_orphaned_nodes_when_building_forest_then_orphans_are_roots() {
    let mut store = NodeStore::new();
    let goal = store.add_root("Goal").unwrap();
    let axis = store.add_child(&goal, "Process").unwrap();
    store.add_child(&axis, "Q1").unwrap();
    store.remove(&axis).unwrap();

    let forest = Forest::from_nodes(store.as_slice());

    assert_eq!(forest.roots().len(), 2);
    assert_eq!(forest.depth(), 1);
}

#[test]
fn given_unknown_id_when_removing_then_not_found() {
    let mut store = NodeStore::new();
    store.add_root("Goal").unwrap();

    assert!(matches!(store.remove("x"), Err(DomainError::NodeNotFound(_))));
    assert_eq!(store.len(), 1);
}
