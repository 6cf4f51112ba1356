//! Centrality metrics for the transition graph.
//!
//! # Overview
//!
//! Two independent measures answer different questions about a label:
//!
//! - **PageRank** (`pagerank`): How much time does a random walk over the
//!   observed transitions spend on this label? Edges are weighted by
//!   transition count.
//! - **Betweenness centrality** (`betweenness`): How often does this label
//!   sit on a shortest path between two others? Edge weights are ignored.
//!
//! # Usage
//!
//! Both metrics take a [`TransitionGraph`] reference and return scores keyed
//! by label. [`centrality`] computes both at once.
//!
//! ```rust
//! use cadence_graph::graph::{SequenceItem, TransitionGraph};
//! use cadence_graph::metrics::{PageRankConfig, centrality};
//!
//! let items: Vec<SequenceItem> = ["A", "B", "A", "B", "C"]
//!     .iter()
//!     .map(|label| SequenceItem::new(*label, 0, ""))
//!     .collect();
//! let graph = TransitionGraph::from_sequence(&items)?;
//! let result = centrality(&graph, &PageRankConfig::default());
//!
//! assert!(result.betweenness["B"] > 0.0);
//! assert_eq!(result.ranked_by_pagerank()[0].0, "B");
//! # Ok::<(), cadence_graph::GraphError>(())
//! ```

pub mod betweenness;
pub mod pagerank;

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::build::TransitionGraph;

pub use betweenness::betweenness_centrality;
pub use pagerank::{PageRankConfig, pagerank};

/// PageRank and betweenness scores computed over the same graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityResult {
    /// Stationary importance per label; sums to ≈1.0 over all labels.
    pub pagerank: HashMap<String, f64>,
    /// Raw (unnormalized) betweenness per label; always ≥ 0.
    pub betweenness: HashMap<String, f64>,
}

impl CentralityResult {
    /// Labels sorted by descending PageRank (ties broken by label).
    #[must_use]
    pub fn ranked_by_pagerank(&self) -> Vec<(&str, f64)> {
        ranked(&self.pagerank)
    }

    /// Labels sorted by descending betweenness (ties broken by label).
    #[must_use]
    pub fn ranked_by_betweenness(&self) -> Vec<(&str, f64)> {
        ranked(&self.betweenness)
    }
}

/// Compute PageRank and betweenness centrality.
///
/// The two computations are independent; neither sees the other's output.
/// A zero-node graph yields two empty maps.
#[must_use]
#[instrument(skip(graph, config))]
pub fn centrality(graph: &TransitionGraph, config: &PageRankConfig) -> CentralityResult {
    let result = CentralityResult {
        pagerank: pagerank(graph, config),
        betweenness: betweenness_centrality(graph),
    };
    debug!(nodes = graph.node_count(), "computed centrality");
    result
}

/// Sort a score map descending by score, then ascending by label.
pub(crate) fn ranked(scores: &HashMap<String, f64>) -> Vec<(&str, f64)> {
    let mut entries: Vec<(&str, f64)> = scores.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}
