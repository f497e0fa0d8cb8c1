//! Arena-backed tree view over the flat node list, used for traversal and
//! terminal display.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::{Node, Status};

/// Tree node in the arena-based forest.
#[derive(Debug)]
pub struct ForestNode<'a> {
    /// The goal-tree node this entry stands for
    pub data: &'a Node,
    /// Index of parent node in the arena, None for roots
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena
    pub children: Vec<Index>,
}

/// Arena-based hierarchical view over a flat node collection.
///
/// Nodes whose parent reference does not resolve become roots.
/// Children keep collection order. Nodes on a parent cycle are not
/// reachable from any root.
#[derive(Debug)]
pub struct Forest<'a> {
    arena: Arena<ForestNode<'a>>,
    roots: Vec<Index>,
}

impl<'a> Forest<'a> {
    #[instrument(level = "debug", skip(nodes), fields(nodes = nodes.len()))]
    pub fn from_nodes(nodes: &'a [Node]) -> Self {
        let mut arena = Arena::with_capacity(nodes.len());
        let mut by_id: HashMap<&str, Index> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let idx = arena.insert(ForestNode {
                data: node,
                parent: None,
                children: Vec::new(),
            });
            by_id.entry(node.id.as_str()).or_insert(idx);
        }

        let mut roots = Vec::new();
        let indices: Vec<Index> = arena.iter().map(|(idx, _)| idx).collect();
        for idx in indices {
            let parent = arena[idx]
                .data
                .parent
                .as_deref()
                .and_then(|p| by_id.get(p).copied())
                .filter(|&p| p != idx);
            match parent {
                Some(parent_idx) => {
                    arena[idx].parent = Some(parent_idx);
                    arena[parent_idx].children.push(idx);
                }
                None => roots.push(idx),
            }
        }

        Self { arena, roots }
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn get_node(&self, idx: Index) -> Option<&ForestNode<'a>> {
        self.arena.get(idx)
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        self.arena
            .get(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of levels of the deepest tree, 0 when empty.
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        1 + self
            .children(idx)
            .iter()
            .map(|&child| self.calculate_depth(child))
            .max()
            .unwrap_or(0)
    }

    /// One display tree per root, labelled by `label`.
    pub fn to_trees<F>(&self, label: F) -> Vec<Tree<String>>
    where
        F: Fn(&Node) -> String,
    {
        fn build<F: Fn(&Node) -> String>(forest: &Forest<'_>, idx: Index, label: &F) -> Tree<String> {
            let mut tree = Tree::new(forest.get_node(idx).map(|n| label(n.data)).unwrap_or_default());
            for &child in forest.children(idx) {
                tree.push(build(forest, child, label));
            }
            tree
        }

        self.roots
            .iter()
            .map(|&root| build(self, root, &label))
            .collect()
    }
}

/// Plain label: `[status] name`.
pub fn plain_label(node: &Node) -> String {
    format!("[{}] {}", status_marker(node.status), node.name)
}

fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Red => "R",
        Status::Yellow => "Y",
        Status::Green => "G",
    }
}
