//! Visual projection of the goal tree for external graph renderers.
//!
//! # Projections
//!
//! - **Flat**: 2-D network. Parents are bordered ellipses in their status
//!   colour with bold labels, leaves are plain text.
//! - **Spatial**: 3-D scatter. Parents are large markers in their status
//!   colour, leaves are small grey markers.
//!
//! The graph serializes to JSON and renders to a Mermaid flowchart.

use std::fmt::Write as _;

use serde::Serialize;

use crate::domain::entities::{Node, Status};
use crate::domain::store::parent_ids;

/// Colour for nodes without a mapped status.
pub const DEFAULT_COLOR: &str = "#888888";

/// Background of parent nodes in the flat projection.
const PARENT_BACKGROUND: &str = "#ffffff";

/// Status colour, or the default grey when no status is known.
pub fn status_color(status: Option<Status>) -> &'static str {
    status.map(Status::color).unwrap_or(DEFAULT_COLOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Flat,
    Spatial,
}

/// Drawing hints for a renderer; which fields are set depends on the projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    /// Flat: `ellipse` for parents, `text` for leaves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'static str>,
    /// Spatial: marker diameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u8>,
    /// Colour the renderer should draw with
    pub draw_color: &'static str,
}

impl Style {
    fn for_node(projection: Projection, is_parent: bool, color: &'static str) -> Self {
        match (projection, is_parent) {
            (Projection::Flat, true) => Self {
                shape: Some("ellipse"),
                bold: Some(true),
                border_width: Some(3),
                background: Some(PARENT_BACKGROUND),
                size: None,
                draw_color: color,
            },
            (Projection::Flat, false) => Self {
                shape: Some("text"),
                bold: Some(false),
                border_width: Some(0),
                background: None,
                size: None,
                draw_color: color,
            },
            (Projection::Spatial, true) => Self {
                shape: None,
                bold: None,
                border_width: None,
                background: None,
                size: Some(12),
                draw_color: color,
            },
            (Projection::Spatial, false) => Self {
                shape: None,
                bold: None,
                border_width: None,
                background: None,
                size: Some(6),
                draw_color: DEFAULT_COLOR,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// Tooltip: name, status and comment
    pub title: String,
    pub is_parent: bool,
    /// Status colour
    pub color: &'static str,
    pub style: Style,
}

/// Directed edge parent → child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectGraph {
    pub projection: Projection,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Map nodes to a drawable graph: one graph node per node, one edge per
/// parent reference.
pub fn build_graph(nodes: &[Node], projection: Projection) -> ProjectGraph {
    let parents = parent_ids(nodes);

    let graph_nodes = nodes
        .iter()
        .map(|n| {
            let is_parent = parents.contains(n.id.as_str());
            let color = status_color(Some(n.status));
            GraphNode {
                id: n.id.clone(),
                label: n.name.clone(),
                title: format!("{}<br>Status: {}<br>Comment: {}", n.name, n.status, n.comment),
                is_parent,
                color,
                style: Style::for_node(projection, is_parent, color),
            }
        })
        .collect();

    let edges = nodes
        .iter()
        .filter_map(|n| {
            n.parent.as_ref().map(|p| GraphEdge {
                from: p.clone(),
                to: n.id.clone(),
            })
        })
        .collect();

    ProjectGraph {
        projection,
        nodes: graph_nodes,
        edges,
    }
}

impl ProjectGraph {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render as a Mermaid flowchart (top-down).
    ///
    /// Node ids are replaced by positional ids since UUIDs are not valid
    /// Mermaid identifiers. Edges to unknown nodes are left out.
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("flowchart TD\n");
        let position = |id: &str| self.nodes.iter().position(|n| n.id == id);

        for (i, node) in self.nodes.iter().enumerate() {
            let label = mermaid_escape(&node.label);
            if node.is_parent {
                let _ = writeln!(out, "    n{i}([\"{label}\"])");
            } else {
                let _ = writeln!(out, "    n{i}[\"{label}\"]");
            }
        }
        for edge in &self.edges {
            if let (Some(from), Some(to)) = (position(&edge.from), position(&edge.to)) {
                let _ = writeln!(out, "    n{from} --> n{to}");
            }
        }
        for (i, node) in self.nodes.iter().enumerate() {
            let width = if node.is_parent { 3 } else { 1 };
            let _ = writeln!(
                out,
                "    style n{i} stroke:{},stroke-width:{width}px",
                node.style.draw_color
            );
        }
        out
    }
}

fn mermaid_escape(s: &str) -> String {
    s.replace('"', "#quot;")
}
