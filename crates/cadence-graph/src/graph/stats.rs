//! Basic statistics for a transition graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: distinct labels and distinct ordered
//!   transitions.
//! - **total_transitions**: sum of edge weights, i.e. the number of
//!   consecutive pairs that produced the graph.
//! - **density**: `edge_count / (node_count * (node_count - 1))`. Self-loops
//!   count as edges, so a graph full of them can exceed 1.0. Zero for graphs
//!   with 0 or 1 node.
//! - **self_loops**: labels that repeat immediately.
//! - **dangling_nodes**: nodes with no outgoing transition (PageRank spreads
//!   their mass uniformly).
//! - **scc_count**: strongly connected components.
//! - **weakly_connected_component_count**: disjoint subgraphs when direction
//!   is ignored.
//! - **max_in_degree** / **max_out_degree**: distinct predecessors/successors.

use petgraph::{
    Direction,
    algo::{connected_components, tarjan_scc},
    visit::EdgeRef,
};
use serde::Serialize;

use crate::graph::build::TransitionGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a transition graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_transitions: u64,
    pub density: f64,
    pub self_loops: usize,
    pub dangling_nodes: usize,
    pub scc_count: usize,
    pub weakly_connected_component_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics from a [`TransitionGraph`].
    #[must_use]
    pub fn from_graph(graph: &TransitionGraph) -> Self {
        let g = graph.graph();
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let total_transitions = g.edge_references().map(|e| u64::from(*e.weight())).sum();
        let self_loops = g
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count();

        let dangling_nodes = g
            .node_indices()
            .filter(|&idx| g.neighbors_directed(idx, Direction::Outgoing).next().is_none())
            .count();

        let max_in_degree = g
            .node_indices()
            .map(|idx| g.neighbors_directed(idx, Direction::Incoming).count())
            .max()
            .unwrap_or(0);
        let max_out_degree = g
            .node_indices()
            .map(|idx| g.neighbors_directed(idx, Direction::Outgoing).count())
            .max()
            .unwrap_or(0);

        Self {
            node_count,
            edge_count,
            total_transitions,
            density: compute_density(node_count, edge_count),
            self_loops,
            dangling_nodes,
            scc_count: tarjan_scc(g).len(),
            weakly_connected_component_count: connected_components(g),
            max_in_degree,
            max_out_degree,
        }
    }
}

fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let possible = node_count * (node_count - 1);
    edge_count as f64 / possible as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
