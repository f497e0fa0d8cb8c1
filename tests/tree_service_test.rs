//! Integration tests for building, saving and loading goal trees.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use goaltree::application::services::TreeService;
use goaltree::application::ApplicationError;
use goaltree::domain::{DomainError, Node, NodeStore, QuestionCatalog, Status};
use goaltree::infrastructure::traits::RealFileSystem;

fn service() -> TreeService {
    TreeService::new(Arc::new(RealFileSystem))
}

fn sample_store() -> NodeStore {
    NodeStore::from_nodes(vec![
        Node::from_parts("g", "Goal", None, "red", "blocked by vendor").unwrap(),
        Node::from_parts("p", "Process", Some("g".into()), "yellow", "").unwrap(),
        Node::from_parts("q", "Documented? \"yes\"", Some("p".into()), "green", "ünïcode").unwrap(),
        Node::from_parts("h", "Second goal", None, "yellow", "").unwrap(),
    ])
}

#[test]
fn given_saved_tree_when_loading_then_identical_nodes_in_order() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project_network.json");
    let store = sample_store();

    // Act
    service().save_tree(&path, &store).expect("save");
    let loaded = service().load_tree(&path).expect("load");

    // Assert
    assert_eq!(loaded, store);
    let ids: Vec<&str> = loaded.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["g", "p", "q", "h"]);
}

#[test]
fn given_saved_tree_when_reading_raw_json_then_array_of_node_objects() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");

    service().save_tree(&path, &sample_store()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["id"], "g");
    assert_eq!(first["parent"], serde_json::Value::Null);
    assert_eq!(first["status"], "red");
    assert_eq!(first["comment"], "blocked by vendor");
}

#[test]
fn given_nested_target_dir_when_saving_then_parent_directories_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data/trees/tree.json");

    service().save_tree(&path, &sample_store()).unwrap();

    assert!(path.is_file());
}

#[test]
fn given_missing_file_when_loading_then_no_tree_error() {
    let dir = TempDir::new().unwrap();

    let result = service().load_tree(&dir.path().join("missing.json"));

    assert!(matches!(result, Err(ApplicationError::NoTree(_))));
}

#[test]
fn given_unknown_status_when_loading_then_invalid_tree_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");
    fs::write(
        &path,
        r#"[{"id":"1","name":"Goal","parent":null,"status":"blue","comment":""}]"#,
    )
    .unwrap();

    let result = service().load_tree(&path);

    assert!(matches!(result, Err(ApplicationError::InvalidTree { .. })));
}

#[test]
fn given_duplicate_ids_when_loading_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");
    fs::write(
        &path,
        r#"[{"id":"1","name":"A"},{"id":"1","name":"B","parent":"1"}]"#,
    )
    .unwrap();

    let result = service().load_tree(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::DuplicateId(ref id))) if id == "1"
    ));
}

#[test]
fn given_dangling_parent_when_loading_then_kept() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");
    fs::write(
        &path,
        r#"[{"id":"1","name":"A"},{"id":"2","name":"Orphan","parent":"gone","status":"red"}]"#,
    )
    .unwrap();

    let store = service().load_tree(&path).expect("dangling parents are tolerated");

    assert_eq!(store.len(), 2);
    assert_eq!(store.dangling().len(), 1);
    assert_eq!(store.get("2").unwrap().status, Status::Red);
}

#[test]
fn given_goals_when_building_session_then_analysis_not_done() {
    let session = service().build_session(["Goal 1", "Goal 2"], QuestionCatalog::fallback());

    assert_eq!(session.nodes().len(), 8);
    assert_eq!(session.nodes().roots().len(), 2);
    assert!(!session.analysis_done());
}
