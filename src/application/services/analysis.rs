//! Analysis service
//!
//! Rolls statuses up in the session, then derives the read-only views:
//! metrics, critical paths, summary and recommendations.

use serde::Serialize;
use tracing::debug;

use crate::application::session::Session;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    aggregate_status, compute_metrics, critical_paths, generate_summary, get_recommendations,
    Metrics, RuleSet,
};

/// Everything the analysis view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub metrics: Metrics,
    pub critical_paths: Vec<Vec<String>>,
    pub summary: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Default)]
pub struct AnalysisService;

impl AnalysisService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate statuses in place, mark the session analysed and build
    /// the report.
    pub fn run(&self, session: &mut Session, rules: &RuleSet) -> ApplicationResult<AnalysisReport> {
        debug!("run: {} nodes, {} rules", session.nodes().len(), rules.len());
        aggregate_status(session.nodes_mut().as_mut_slice());
        session.set_analysis_done(true);
        self.report(session, rules)
    }

    /// Build the report for an already analysed session.
    pub fn report(&self, session: &Session, rules: &RuleSet) -> ApplicationResult<AnalysisReport> {
        if !session.analysis_done() {
            return Err(ApplicationError::AnalysisNotRun);
        }
        let nodes = session.nodes().as_slice();
        Ok(AnalysisReport {
            metrics: compute_metrics(nodes),
            critical_paths: critical_paths(nodes),
            summary: generate_summary(nodes),
            recommendations: get_recommendations(nodes, rules),
        })
    }
}
