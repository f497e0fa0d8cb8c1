//! Markdown digest of the red and yellow nodes.

use crate::domain::entities::{Node, Status};
use crate::domain::store::parent_ids;

pub const RED_HEADING: &str = "**Current main problems (Red):**";
pub const YELLOW_HEADING: &str = "**Observation points (Yellow):**";

/// Render red and yellow nodes as two markdown lists, red first.
/// Nodes with children are bold, leaves plain.
pub fn generate_summary(nodes: &[Node]) -> String {
    let parents = parent_ids(nodes);

    let label = |n: &Node| {
        if parents.contains(n.id.as_str()) {
            format!("**{}**", n.name)
        } else {
            n.name.clone()
        }
    };
    let bucket = |status: Status| -> Vec<String> {
        nodes
            .iter()
            .filter(|n| n.status == status)
            .map(|n| label(n))
            .collect()
    };

    let mut lines = vec![RED_HEADING.to_string()];
    push_section(&mut lines, bucket(Status::Red), "- No red nodes.");
    lines.push(String::new());
    lines.push(YELLOW_HEADING.to_string());
    push_section(&mut lines, bucket(Status::Yellow), "- No yellow nodes.");

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, labels: Vec<String>, empty: &str) {
    if labels.is_empty() {
        lines.push(empty.to_string());
    } else {
        lines.extend(labels.into_iter().map(|l| format!("- {l}")));
    }
}
