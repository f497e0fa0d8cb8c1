//! Analysis over a node collection:
//! - status roll-up to ancestors
//! - status metrics
//! - critical paths to red nodes

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::entities::{Node, Status};
use crate::domain::store::lookup;

/// Raise every ancestor to the most severe status found below it.
///
/// Repeats full passes until nothing changes. Statuses are only ever
/// raised, so the loop terminates after at most depth + 1 passes.
/// Nodes whose parent does not resolve are skipped.
#[instrument(level = "debug", skip(nodes), fields(nodes = nodes.len()))]
pub fn aggregate_status(nodes: &mut [Node]) {
    let index: HashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for i in 0..nodes.len() {
            let Some(parent_idx) = nodes[i].parent.as_deref().and_then(|p| index.get(p)).copied()
            else {
                continue;
            };
            let status = nodes[i].status;
            if status.rank() > nodes[parent_idx].status.rank() {
                nodes[parent_idx].status = status;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    debug!("aggregate_status: converged after {} passes", passes);
}

/// Status tallies across all nodes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Metrics {
    pub total: usize,
    pub red: usize,
    pub yellow: usize,
    pub green: usize,
    /// Fraction 0..1, 0 when there are no nodes
    pub red_pct: f64,
    pub yellow_pct: f64,
    pub green_pct: f64,
}

impl Metrics {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Red => self.red,
            Status::Yellow => self.yellow,
            Status::Green => self.green,
        }
    }

    pub fn pct(&self, status: Status) -> f64 {
        match status {
            Status::Red => self.red_pct,
            Status::Yellow => self.yellow_pct,
            Status::Green => self.green_pct,
        }
    }
}

pub fn compute_metrics(nodes: &[Node]) -> Metrics {
    let total = nodes.len();
    let tally = |status: Status| nodes.iter().filter(|n| n.status == status).count();
    let (red, yellow, green) = (tally(Status::Red), tally(Status::Yellow), tally(Status::Green));
    let ratio = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    };

    Metrics {
        total,
        red,
        yellow,
        green,
        red_pct: ratio(red),
        yellow_pct: ratio(yellow),
        green_pct: ratio(green),
    }
}

/// Root-to-node name sequences, one per red node, in collection order.
///
/// The upward walk ends at a root, at a parent id that does not resolve,
/// or when a node repeats.
#[instrument(level = "debug", skip(nodes))]
pub fn critical_paths(nodes: &[Node]) -> Vec<Vec<String>> {
    let by_id = lookup(nodes);

    nodes
        .iter()
        .filter(|n| n.status == Status::Red)
        .map(|red| {
            let mut path = Vec::new();
            let mut seen = HashSet::new();
            let mut current = Some(red);
            while let Some(node) = current {
                if !seen.insert(node.id.as_str()) {
                    break;
                }
                path.push(node.name.clone());
                current = node.parent.as_deref().and_then(|p| by_id.get(p).copied());
            }
            path.reverse();
            path
        })
        .collect()
}
