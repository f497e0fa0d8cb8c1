//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod analysis;
pub mod builder;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod forest;
pub mod graph;
pub mod rules;
pub mod store;
pub mod summary;

pub use analysis::{aggregate_status, compute_metrics, critical_paths, Metrics};
pub use builder::{build_tree, TreeBuilder};
pub use catalog::{CatalogEntry, CatalogParseError, QuestionCatalog};
pub use entities::*;
pub use error::DomainError;
pub use forest::Forest;
pub use graph::{build_graph, ProjectGraph, Projection};
pub use rules::{get_recommendations, Rule, RuleSet, RuleSpec};
pub use store::NodeStore;
pub use summary::generate_summary;
