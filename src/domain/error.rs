//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the goal-tree model.
/// These are independent of persistence and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid status: {0} (expected one of red, yellow, green)")]
    InvalidStatus(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    #[error("node name must not be empty")]
    EmptyName,
}
