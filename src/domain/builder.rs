//! Tree builder: expands goal texts into goal → axis → question nodes.

use tracing::{debug, instrument};

use crate::domain::catalog::QuestionCatalog;
use crate::domain::entities::Node;

/// Expands free-text goals into a flat node list using a question catalog.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    catalog: QuestionCatalog,
}

impl TreeBuilder {
    pub fn new(catalog: QuestionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Build the node list for all goals.
    ///
    /// Goals are trimmed, blank ones skipped. For every goal the root comes
    /// first, followed by the catalog entries in catalog order, each attached
    /// to the root or to the node created for its catalog parent.
    /// Identical goal texts produce independent trees.
    #[instrument(level = "debug", skip(self, goals))]
    pub fn build<I, S>(&self, goals: I) -> Vec<Node>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = self.catalog.entries();
        let mut nodes = Vec::new();

        for raw in goals {
            let goal = raw.as_ref().trim();
            if goal.is_empty() {
                continue;
            }

            let root = Node::new(goal, None);
            let root_id = root.id.clone();
            nodes.push(root);

            // ids of the nodes created for each catalog entry of this goal
            let mut created: Vec<String> = Vec::with_capacity(entries.len());
            for entry in entries {
                let parent = entry
                    .parent
                    .and_then(|idx| created.get(idx))
                    .unwrap_or(&root_id);
                let node = Node::new(entry.name.as_str(), Some(parent.as_str()));
                created.push(node.id.clone());
                nodes.push(node);
            }
            debug!("goal {:?}: {} nodes", goal, created.len() + 1);
        }

        nodes
    }
}

/// Build a goal tree with the given catalog.
pub fn build_tree<I, S>(goals: I, catalog: &QuestionCatalog) -> Vec<Node>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    TreeBuilder::new(catalog.clone()).build(goals)
}
