//! Infrastructure layer: real filesystem and service wiring.

pub mod di;
pub mod error;
pub mod traits;

pub use error::InfraError;
