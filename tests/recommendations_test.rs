//! Integration tests for rule-based recommendations.

use goaltree::domain::{get_recommendations, Node, RuleSet, RuleSpec, Status};

fn rules(specs: &[(&str, &str)]) -> RuleSet {
    let specs: Vec<RuleSpec> = specs
        .iter()
        .map(|(pattern, action)| RuleSpec {
            pattern: pattern.to_string(),
            action: action.to_string(),
        })
        .collect();
    RuleSet::compile(&specs)
}

#[test]
fn given_crm_rule_when_red_node_matches_then_one_recommendation() {
    // Arrange
    let rules = rules(&[("CRM", "Escalate")]);
    let nodes = vec![Node::new("New CRM implementation", None).with_status(Status::Red)];

    // Act
    let recs = get_recommendations(&nodes, &rules);

    // Assert
    assert_eq!(recs.len(), 1);
    assert!(recs[0].contains("New CRM implementation"));
    assert!(recs[0].contains("Escalate"));
}

#[test]
fn given_crm_rule_when_node_is_green_then_no_recommendation() {
    let rules = rules(&[("CRM", "Escalate")]);
    let nodes = vec![Node::new("New CRM implementation", None).with_status(Status::Green)];

    assert!(get_recommendations(&nodes, &rules).is_empty());
}

#[test]
fn given_several_matching_rules_when_recommending_then_node_major_rule_order() {
    // Arrange
    let rules = rules(&[("crm", "Escalate"), ("implementation", "Add owner"), ("^x", "never")]);
    let nodes = vec![
        Node::new("CRM implementation", None).with_status(Status::Red),
        Node::new("Sales process", None).with_status(Status::Yellow),
        Node::new("Legacy crm export", None).with_status(Status::Red),
    ];

    // Act
    let recs = get_recommendations(&nodes, &rules);

    // Assert
    assert_eq!(
        recs,
        vec![
            "**CRM implementation** → Escalate",
            "**CRM implementation** → Add owner",
            "**Legacy crm export** → Escalate",
        ]
    );
}

#[test]
fn given_empty_pattern_when_recommending_then_rule_is_ignored() {
    let rules = rules(&[("", "Always")]);
    let nodes = vec![Node::new("Anything", None).with_status(Status::Red)];

    assert!(get_recommendations(&nodes, &rules).is_empty());
}
