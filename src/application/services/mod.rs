//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem)
//! but are themselves concrete structs, not traits.

mod analysis;
mod catalog;
mod tree;

pub use analysis::{AnalysisReport, AnalysisService};
pub use catalog::CatalogService;
pub use tree::TreeService;
