//! Whole-graph analysis report.
//!
//! Runs every single-graph analysis under one [`AnalysisConfig`] and bundles
//! the results into a serializable value. Each analysis is computed
//! independently from the same immutable graph.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, instrument};

use crate::community::{CommunityResult, detect_communities};
use crate::config::AnalysisConfig;
use crate::graph::build::{ChordNode, Transition, TransitionGraph};
use crate::graph::cycles::enumerate_cycles;
use crate::graph::normalize::transition_probabilities;
use crate::graph::stats::GraphStats;
use crate::metrics::{CentralityResult, centrality};

/// Every single-graph analysis for one graph.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub content_hash: String,
    pub stats: GraphStats,
    pub nodes: Vec<ChordNode>,
    pub transitions: Vec<Transition>,
    pub probabilities: HashMap<String, HashMap<String, f64>>,
    pub centrality: CentralityResult,
    pub communities: CommunityResult,
    pub cycles: Vec<Vec<String>>,
}

impl AnalysisReport {
    /// Run all analyses over `graph`.
    ///
    /// The config is used as given; [`crate::load_config`] has already
    /// validated anything read from disk.
    #[must_use]
    #[instrument(skip(graph, config))]
    pub fn run(graph: &TransitionGraph, config: &AnalysisConfig) -> Self {
        let report = Self {
            content_hash: graph.content_hash().to_string(),
            stats: GraphStats::from_graph(graph),
            nodes: graph.nodes().cloned().collect(),
            transitions: graph.transitions().collect(),
            probabilities: transition_probabilities(graph),
            centrality: centrality(graph, &config.pagerank),
            communities: detect_communities(graph, &config.community),
            cycles: enumerate_cycles(graph, config.cycles.max_length),
        };
        info!(
            nodes = report.stats.node_count,
            edges = report.stats.edge_count,
            communities = report.communities.num_communities,
            cycles = report.cycles.len(),
            "analysis complete"
        );
        report
    }
}
