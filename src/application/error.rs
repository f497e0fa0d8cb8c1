//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("no goal tree: {0}")]
    NoTree(PathBuf),

    #[error("analysis has not been run")]
    AnalysisNotRun,

    #[error("invalid tree file {path}: {message}")]
    InvalidTree { path: PathBuf, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot render {what}: {source}")]
    Render {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
