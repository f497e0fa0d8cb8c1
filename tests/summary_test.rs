//! Integration tests for the markdown summary.

use goaltree::domain::{generate_summary, NodeStore, NodeUpdate, Status};

fn set_status(store: &mut NodeStore, id: &str, status: Status) {
    store
        .update(
            id,
            NodeUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
        .unwrap();
}

#[test]
fn given_red_parent_and_yellow_leaf_when_summarizing_then_parent_bold_leaf_plain() {
    // Arrange
    let mut store = NodeStore::new();
    let goal = store.add_root("Launch").unwrap();
    let axis = store.add_child(&goal, "Process").unwrap();
    let question = store.add_child(&axis, "Documented?").unwrap();
    set_status(&mut store, &goal, Status::Red);
    set_status(&mut store, &axis, Status::Green);
    set_status(&mut store, &question, Status::Yellow);

    // Act
    let summary = generate_summary(store.as_slice());

    // Assert
    assert_eq!(
        summary,
        "**Current main problems (Red):**\n- **Launch**\n\n**Observation points (Yellow):**\n- Documented?"
    );
}

#[test]
fn given_all_green_when_summarizing_then_both_sections_state_no_nodes() {
    let mut store = NodeStore::new();
    let goal = store.add_root("Launch").unwrap();
    set_status(&mut store, &goal, Status::Green);

    let summary = generate_summary(store.as_slice());

    assert!(summary.contains("- No red nodes."));
    assert!(summary.contains("- No yellow nodes."));
    assert!(summary.find("(Red)").unwrap() < summary.find("(Yellow)").unwrap());
}

#[test]
fn given_empty_collection_when_summarizing_then_no_fault() {
    let summary = generate_summary(&[]);

    assert!(summary.starts_with("**Current main problems (Red):**"));
}
