//! Per-run application state: the current node collection and the
//! analysis flag. Handlers receive the session by reference.

use crate::domain::NodeStore;

#[derive(Debug, Clone, Default)]
pub struct Session {
    nodes: NodeStore,
    analysis_done: bool,
}

impl Session {
    pub fn new(nodes: NodeStore) -> Self {
        Self {
            nodes,
            analysis_done: false,
        }
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeStore {
        &mut self.nodes
    }

    /// Replace the whole collection. A new tree invalidates earlier analysis.
    pub fn set_nodes(&mut self, nodes: NodeStore) {
        self.nodes = nodes;
        self.analysis_done = false;
    }

    pub fn into_nodes(self) -> NodeStore {
        self.nodes
    }

    pub fn analysis_done(&self) -> bool {
        self.analysis_done
    }

    pub fn set_analysis_done(&mut self, done: bool) {
        self.analysis_done = done;
    }
}
