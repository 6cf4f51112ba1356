//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a label lies on shortest paths
//! between other pairs of labels. High-betweenness labels are pivots: a
//! progression that moves between two regions of the graph tends to pass
//! through them.
//!
//! # Algorithm
//!
//! We implement Brandes' algorithm (2001) for unweighted directed graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts,
//!    distances and predecessor lists.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Transition counts are ignored; only whether an edge exists matters.
//! Self-loops never lie on a shortest path and contribute nothing.
//!
//! Complexity: O(V * E).
//!
//! # Output
//!
//! Scores are **not** normalized. Callers can normalize by dividing by
//! `(n-1)*(n-2)` where `n` is the node count.

use std::collections::{HashMap, VecDeque};

use petgraph::visit::EdgeRef;
use tracing::instrument;

use crate::graph::build::TransitionGraph;

/// Compute betweenness centrality for all labels in the graph.
///
/// # Returns
///
/// A `HashMap<String, f64>` mapping each label to its betweenness score.
/// Labels with no shortest paths through them receive 0.0. An empty graph
/// yields an empty map.
#[must_use]
#[instrument(skip(graph))]
pub fn betweenness_centrality(graph: &TransitionGraph) -> HashMap<String, f64> {
    let g = graph.graph();
    let n = g.node_count();

    if n == 0 {
        return HashMap::new();
    }

    // Unweighted adjacency; parallel edges cannot exist in a TransitionGraph.
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for edge in g.edge_references() {
        adjacency[edge.source().index()].push(edge.target().index());
    }

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    // Scratch buffers, reset per source.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        predecessors.iter_mut().for_each(Vec::clear);
        sigma.fill(0.0);
        dist.fill(None);
        delta.fill(0.0);

        sigma[s] = 1.0;
        dist[s] = Some(0);
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let Some(dv) = dist[v] else { continue };

            for &w in &adjacency[v] {
                // First visit to w?
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    graph
        .index_labels()
        .into_iter()
        .zip(cb)
        .map(|(label, score)| (label.to_string(), score))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
