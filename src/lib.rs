//! goaltree: project goal trees with traffic-light statuses.
//!
//! Layers, inner to outer:
//! - `domain`: nodes, status roll-up, metrics, rules, graph projection (pure)
//! - `application`: session state and services over a `FileSystem`
//! - `infrastructure`: filesystem implementation and service wiring
//! - `cli`: argument parsing, command dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
