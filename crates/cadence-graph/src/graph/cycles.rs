//! Bounded enumeration of simple directed cycles.
//!
//! # Algorithm
//!
//! From every node as a start, a depth-first search extends a simple path
//! along outgoing edges. Whenever the current path has an edge back to the
//! start node, the path is a simple cycle. The same cycle is found once per
//! member node, so each one is canonicalized (rotated so its
//! lexicographically smallest label comes first) and recorded only the first
//! time that canonical form is seen.
//!
//! Paths are never extended past `max_length` nodes. Self-loops are ignored:
//! the shortest reportable cycle is `A → B → A`.
//!
//! The search is iterative with an explicit frame stack. Depth is already
//! bounded by `max_length`, but the explicit stack keeps frame size flat.
//!
//! # Complexity
//!
//! Exponential in the worst case (dense graphs). Intended for the small
//! graphs produced from finite symbol alphabets; callers with larger graphs
//! should lower `max_length` or pre-filter.

use std::collections::HashSet;

use fixedbitset::FixedBitSet;
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::graph::build::TransitionGraph;

/// Longest cycle reported when the caller does not choose a bound.
pub const DEFAULT_MAX_CYCLE_LENGTH: usize = 6;

/// Enumerate simple directed cycles with between 2 and `max_length` nodes.
///
/// Each cycle is returned as its canonical label sequence; the last label
/// implicitly connects back to the first. The list is sorted by cycle length
/// and then lexicographically.
///
/// A `max_length` below 2 admits no cycle and returns an empty list rather
/// than an error.
#[must_use]
#[instrument(skip(graph))]
pub fn enumerate_cycles(graph: &TransitionGraph, max_length: usize) -> Vec<Vec<String>> {
    let n = graph.node_count();
    if max_length < 2 || n == 0 {
        return Vec::new();
    }

    let adjacency = simple_adjacency(graph);
    let labels = graph.index_labels();

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut cycles: Vec<Vec<String>> = Vec::new();

    let mut path: Vec<usize> = Vec::with_capacity(max_length);
    let mut on_path = FixedBitSet::with_capacity(n);
    // Each frame: (node, position of the next neighbor to try).
    let mut stack: Vec<(usize, usize)> = Vec::with_capacity(max_length);

    for start in 0..n {
        path.push(start);
        on_path.insert(start);
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, pos) = *frame;

            let Some(&next) = adjacency[node].get(pos) else {
                // Neighbors exhausted: backtrack.
                stack.pop();
                path.pop();
                on_path.set(node, false);
                continue;
            };
            frame.1 += 1;

            if next == start {
                if path.len() >= 2 {
                    let canonical = canonicalize(&path, &labels);
                    if seen.insert(canonical.clone()) {
                        cycles.push(canonical);
                    }
                }
            } else if !on_path.contains(next) && path.len() < max_length {
                path.push(next);
                on_path.insert(next);
                stack.push((next, 0));
            }
        }
    }

    cycles.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    debug!(cycles = cycles.len(), max_length, "enumerated cycles");
    cycles
}

/// Unweighted directed adjacency without self-loops, sorted by index.
fn simple_adjacency(graph: &TransitionGraph) -> Vec<Vec<usize>> {
    let g = graph.graph();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); g.node_count()];
    for edge in g.edge_references() {
        let (from, to) = (edge.source().index(), edge.target().index());
        if from != to {
            adjacency[from].push(to);
        }
    }
    for neighbors in &mut adjacency {
        neighbors.sort_unstable();
        neighbors.dedup();
    }
    adjacency
}

/// Rotate `path` so its smallest label comes first.
fn canonicalize(path: &[usize], labels: &[&str]) -> Vec<String> {
    let pivot = path
        .iter()
        .enumerate()
        .min_by_key(|&(_, &node)| labels[node])
        .map_or(0, |(pos, _)| pos);

    path[pivot..]
        .iter()
        .chain(&path[..pivot])
        .map(|&node| labels[node].to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
