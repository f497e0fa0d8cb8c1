//! Goal tree service
//!
//! Builds trees from goal texts and persists them as JSON node arrays.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::session::Session;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{NodeStore, QuestionCatalog, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Service for building, loading and saving goal trees.
pub struct TreeService {
    fs: Arc<dyn FileSystem>,
}

impl TreeService {
    /// Create a new tree service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Build a fresh session from goal texts.
    pub fn build_session<I, S>(&self, goals: I, catalog: QuestionCatalog) -> Session
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nodes = TreeBuilder::new(catalog).build(goals);
        debug!("build_session: {} nodes", nodes.len());
        Session::new(NodeStore::from_nodes(nodes))
    }

    /// Write the tree as a pretty-printed JSON array, preserving node order.
    pub fn save_tree(&self, path: &Path, nodes: &NodeStore) -> ApplicationResult<()> {
        debug!("save_tree: {} nodes to {}", nodes.len(), path.display());
        let json = serde_json::to_string_pretty(nodes).with_path_context("serialize tree", path)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write_replace(path, &format!("{json}\n"))
            .with_path_context("write tree", path)
    }

    /// Read a tree file.
    ///
    /// Fails on malformed JSON, unknown statuses and duplicate ids.
    /// Dangling parent references are logged and kept.
    pub fn load_tree(&self, path: &Path) -> ApplicationResult<NodeStore> {
        debug!("load_tree: {}", path.display());
        if !self.fs.exists(path) {
            return Err(ApplicationError::NoTree(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read tree", path)?;
        let store = serde_json::from_str::<NodeStore>(&content)
            .with_path_context("parse tree", path)?;
        store.validate()?;

        for orphan in store.dangling() {
            warn!(
                "node {:?} ({}) references missing parent {:?}",
                orphan.name,
                orphan.id,
                orphan.parent.as_deref().unwrap_or_default()
            );
        }
        debug!("load_tree: {} nodes", store.len());
        Ok(store)
    }

    /// Load a tree file into a new session.
    pub fn load_session(&self, path: &Path) -> ApplicationResult<Session> {
        Ok(Session::new(self.load_tree(path)?))
    }
}
