//! Weighted PageRank over transition counts.
//!
//! # Algorithm
//!
//! Standard power iteration on the row-stochastic transition matrix:
//!
//! ```text
//! PR(v) = (1 - d) / N
//!       + d * Σ PR(u) * w(u, v) / W(u)       for each u → v, W(u) > 0
//!       + d * Σ PR(u) / N                    for each dangling u (W(u) = 0)
//! ```
//!
//! where `d` is the damping factor (default 0.85), `w(u, v)` the transition
//! count and `W(u)` the node's total outgoing count. Dangling nodes hand
//! their damped mass to every node uniformly, so no probability is lost and
//! the scores remain a distribution.
//!
//! # Fixed iteration count
//!
//! There is no tolerance check: exactly `iterations` rounds are run. The
//! iteration count alone bounds runtime, and a given `(graph, config)` pair
//! always produces the same scores.

use std::collections::HashMap;

use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::GraphError;
use crate::graph::build::TransitionGraph;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a transition vs teleporting).
    /// Must be in `(0, 1]`. Default: 0.85.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Number of power-iteration rounds. Must be at least 1. Default: 100.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            iterations: default_iterations(),
        }
    }
}

impl PageRankConfig {
    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidDamping`] if `damping` is not in `(0, 1]`
    /// (NaN included); [`GraphError::ZeroIterations`] if `iterations` is 0.
    pub fn validate(&self) -> Result<(), GraphError> {
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(GraphError::InvalidDamping(self.damping));
        }
        if self.iterations == 0 {
            return Err(GraphError::ZeroIterations);
        }
        Ok(())
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_iterations() -> usize {
    100
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute weighted PageRank for every label.
///
/// The config is used as given; call [`PageRankConfig::validate`] first when
/// it comes from user input. With `iterations == 0` the uniform starting
/// distribution is returned.
///
/// # Returns
///
/// Label → score. Scores sum to 1.0 within floating-point error for any
/// non-empty graph. An empty graph yields an empty map.
#[must_use]
#[instrument(skip(graph, config))]
pub fn pagerank(graph: &TransitionGraph, config: &PageRankConfig) -> HashMap<String, f64> {
    let g = graph.graph();
    let n = g.node_count();

    if n == 0 {
        return HashMap::new();
    }

    // Index-addressed weighted adjacency and outgoing totals.
    let mut out_edges: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    let mut out_weight: Vec<f64> = vec![0.0; n];
    for edge in g.edge_references() {
        let (u, v) = (edge.source().index(), edge.target().index());
        let w = f64::from(*edge.weight());
        out_edges[u].push((v, w));
        out_weight[u] += w;
    }

    let n_f64 = n as f64;
    let damping = config.damping;
    let base = (1.0 - damping) / n_f64;

    // Initialize ranks uniformly.
    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    for _ in 0..config.iterations {
        // Dangling mass is spread over every node, teleport included.
        let dangling: f64 = (0..n)
            .filter(|&u| out_weight[u] <= 0.0)
            .map(|u| ranks[u])
            .sum();
        new_ranks.fill(base + damping * dangling / n_f64);

        // Distribute rank along outgoing edges, proportional to weight.
        for (u, edges) in out_edges.iter().enumerate() {
            if out_weight[u] <= 0.0 {
                continue;
            }
            let mass = damping * ranks[u] / out_weight[u];
            for &(v, w) in edges {
                new_ranks[v] += mass * w;
            }
        }

        std::mem::swap(&mut ranks, &mut new_ranks);
    }

    let labels = graph.index_labels();
    labels
        .into_iter()
        .zip(ranks)
        .map(|(label, score)| (label.to_string(), score))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
