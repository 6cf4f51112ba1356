//! Per-node outgoing transition probabilities.
//!
//! Each node's outgoing edge weights are divided by the node's total
//! outgoing weight, giving the empirical distribution over "what comes next".
//! A node with no outgoing edges gets an empty distribution: there is no
//! implicit self-transition and nothing is divided by zero.

use std::collections::HashMap;

use petgraph::{Direction, graph::NodeIndex, visit::EdgeRef};
use tracing::instrument;

use crate::graph::build::TransitionGraph;

/// Compute the outgoing probability distribution of every node.
///
/// The result has one entry per node. Inner maps sum to 1.0 (within
/// floating-point error) for nodes with at least one outgoing edge and are
/// empty for nodes without.
#[must_use]
#[instrument(skip(graph))]
pub fn transition_probabilities(graph: &TransitionGraph) -> HashMap<String, HashMap<String, f64>> {
    let g = graph.graph();
    g.node_indices()
        .map(|idx| (g[idx].label.clone(), outgoing_distribution(graph, idx)))
        .collect()
}

/// Probability of moving from `from` to `to` in one step.
///
/// Returns `None` if `from` is not a node. Returns `Some(0.0)` if `from`
/// exists but the transition was never observed (including when `from` has
/// no outgoing edges at all).
#[must_use]
pub fn transition_probability(graph: &TransitionGraph, from: &str, to: &str) -> Option<f64> {
    let idx = graph.node_index(from)?;
    let total = out_weight(graph, idx);
    if total == 0 {
        return Some(0.0);
    }
    let weight = graph.weight(from, to).unwrap_or(0);
    Some(f64::from(weight) / total as f64)
}

fn outgoing_distribution(graph: &TransitionGraph, idx: NodeIndex) -> HashMap<String, f64> {
    let g = graph.graph();
    let total = out_weight(graph, idx);
    if total == 0 {
        return HashMap::new();
    }
    let total = total as f64;
    g.edges_directed(idx, Direction::Outgoing)
        .map(|e| (g[e.target()].label.clone(), f64::from(*e.weight()) / total))
        .collect()
}

/// Sum of outgoing edge weights, widened so long sequences cannot overflow.
pub(crate) fn out_weight(graph: &TransitionGraph, idx: NodeIndex) -> u64 {
    graph
        .graph()
        .edges_directed(idx, Direction::Outgoing)
        .map(|e| u64::from(*e.weight()))
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
