//! Assessment templates: question catalog and recommendation rules.
//!
//! Both are optional configuration. Problems are logged and replaced by a
//! usable default, never returned as errors.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{QuestionCatalog, RuleSet, RuleSpec};
use crate::infrastructure::traits::FileSystem;

/// Loads the question catalog and rule files.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
}

impl CatalogService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the question catalog, falling back to the three-axis skeleton
    /// when the file is missing, unreadable or malformed.
    pub fn load_questions(&self, path: &Path) -> QuestionCatalog {
        if !self.fs.exists(path) {
            info!("{} not found, using fallback axes", path.display());
            return QuestionCatalog::fallback();
        }
        let content = match self.fs.read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("cannot read {}: {}, using fallback axes", path.display(), e);
                return QuestionCatalog::fallback();
            }
        };
        match QuestionCatalog::parse(&content) {
            Ok(catalog) => {
                debug!(
                    "load_questions: {} entries, axes {:?}",
                    catalog.len(),
                    catalog.axes()
                );
                catalog
            }
            Err(e) => {
                warn!("{}: {}, using fallback axes", path.display(), e.message);
                QuestionCatalog::fallback()
            }
        }
    }

    /// Load recommendation rules. Missing or malformed files give an empty set.
    pub fn load_rules(&self, path: &Path) -> RuleSet {
        if !self.fs.exists(path) {
            info!("{} not found, no recommendation rules", path.display());
            return RuleSet::default();
        }
        let content = match self.fs.read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("cannot read {}: {}", path.display(), e);
                return RuleSet::default();
            }
        };
        // an empty document is an empty list
        let specs = match serde_yaml::from_str::<Option<Vec<RuleSpec>>>(&content) {
            Ok(specs) => specs.unwrap_or_default(),
            Err(e) => {
                warn!("{}: {}, ignoring rules", path.display(), e);
                return RuleSet::default();
            }
        };
        let rules = RuleSet::compile(&specs);
        debug!("load_rules: {} of {} rules usable", rules.len(), specs.len());
        rules
    }
}
