//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Traffic-light status of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Red,
    #[default]
    Yellow,
    Green,
}

impl Status {
    /// All statuses in display order.
    pub const ALL: [Status; 3] = [Status::Red, Status::Yellow, Status::Green];

    /// Severity rank used for roll-up: red=2 > yellow=1 > green=0.
    pub fn rank(self) -> u8 {
        match self {
            Status::Red => 2,
            Status::Yellow => 1,
            Status::Green => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Red => "red",
            Status::Yellow => "yellow",
            Status::Green => "green",
        }
    }

    /// Hex colour of the status in graph projections.
    pub fn color(self) -> &'static str {
        match self {
            Status::Red => "#e74c3c",
            Status::Yellow => "#f1c40f",
            Status::Green => "#2ecc71",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Status::Red),
            "yellow" => Ok(Status::Yellow),
            "green" => Ok(Status::Green),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// A single entry of the goal tree: goal, axis or reflection question.
///
/// Serialized form is the persisted tree format:
/// `{id, name, parent, status, comment}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, generated at creation
    pub id: String,
    /// Display text
    pub name: String,
    /// Id of the parent node, None for top-level goals
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub comment: String,
}

impl Node {
    /// Create a node with a fresh id, status yellow and no comment.
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            parent: parent.map(str::to_string),
            status: Status::default(),
            comment: String::new(),
        }
    }

    /// Create a node from raw field values, validating the status string.
    pub fn from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
        parent: Option<String>,
        status: &str,
        comment: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            parent,
            status: status.parse()?,
            comment: comment.into(),
        })
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Field changes applied by manual editing. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeUpdate {
    pub name: Option<String>,
    pub status: Option<Status>,
    pub comment: Option<String>,
}
