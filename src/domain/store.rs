//! Flat, ordered node collection with the manual editing operations.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{Node, NodeUpdate};
use crate::domain::error::DomainError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, DomainError>;

/// Ordered collection of goal-tree nodes.
///
/// Nodes reference their parent by id. The collection is a forest: several
/// roots are allowed. Serializes transparently as the JSON node array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn as_mut_slice(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn get_mut(&mut self, id: &str) -> StoreResult<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DomainError::NodeNotFound(id.to_string()))
    }

    /// Top-level goals, in collection order.
    pub fn roots(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.is_root()).collect()
    }

    /// Direct children of `id`, in collection order.
    pub fn children(&self, id: &str) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.parent.as_deref() == Some(id))
            .collect()
    }

    pub fn is_parent(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.parent.as_deref() == Some(id))
    }

    /// Ids of all nodes with at least one child.
    pub fn parent_ids(&self) -> HashSet<&str> {
        parent_ids(&self.nodes)
    }

    /// Nodes whose parent reference does not resolve within the collection.
    pub fn dangling(&self) -> Vec<&Node> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| matches!(n.parent.as_deref(), Some(p) if !ids.contains(p)))
            .collect()
    }

    /// Check that node ids are unique.
    pub fn validate(&self) -> StoreResult<()> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(DomainError::DuplicateId(node.id.clone()));
            }
        }
        Ok(())
    }

    /// Append a new top-level goal. Returns its id.
    pub fn add_root(&mut self, name: &str) -> StoreResult<String> {
        let name = non_blank(name)?;
        let node = Node::new(name, None);
        let id = node.id.clone();
        debug!("add_root: {} ({})", name, id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Append a new child under `parent_id`. Returns its id.
    pub fn add_child(&mut self, parent_id: &str, name: &str) -> StoreResult<String> {
        let name = non_blank(name)?;
        if self.get(parent_id).is_none() {
            return Err(DomainError::NodeNotFound(parent_id.to_string()));
        }
        let node = Node::new(name, Some(parent_id));
        let id = node.id.clone();
        debug!("add_child: {} ({}) under {}", name, id, parent_id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Apply the given field changes to node `id`.
    pub fn update(&mut self, id: &str, update: NodeUpdate) -> StoreResult<&Node> {
        if let Some(name) = &update.name {
            non_blank(name)?;
        }
        let node = self.get_mut(id)?;
        if let Some(name) = update.name {
            node.name = name.trim().to_string();
        }
        if let Some(status) = update.status {
            node.status = status;
        }
        if let Some(comment) = update.comment {
            node.comment = comment;
        }
        Ok(&*node)
    }

    /// Remove exactly node `id`. Descendants stay in the collection with a
    /// dangling parent reference.
    pub fn remove(&mut self, id: &str) -> StoreResult<Node> {
        let pos = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| DomainError::NodeNotFound(id.to_string()))?;
        let removed = self.nodes.remove(pos);
        debug!(
            "remove: {} ({}), {} orphaned children",
            removed.name,
            removed.id,
            self.children(id).len()
        );
        Ok(removed)
    }

    /// Lookup table id → node.
    pub fn lookup(&self) -> HashMap<&str, &Node> {
        lookup(&self.nodes)
    }
}

impl From<Vec<Node>> for NodeStore {
    fn from(nodes: Vec<Node>) -> Self {
        Self::from_nodes(nodes)
    }
}

impl<'a> IntoIterator for &'a NodeStore {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Ids of all nodes that are referenced as a parent by another node.
pub fn parent_ids(nodes: &[Node]) -> HashSet<&str> {
    nodes.iter().filter_map(|n| n.parent.as_deref()).collect()
}

pub fn lookup(nodes: &[Node]) -> HashMap<&str, &Node> {
    nodes.iter().map(|n| (n.id.as_str(), n)).collect()
}

fn non_blank(name: &str) -> StoreResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(DomainError::EmptyName)
    } else {
        Ok(trimmed)
    }
}
