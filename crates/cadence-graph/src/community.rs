//! Community detection using weighted label propagation.
//!
//! # Algorithm
//!
//! 1. Fold the directed graph into an undirected, weighted neighbor list:
//!    every transition `a → b` adds `b` to `a`'s neighbors and `a` to `b`'s,
//!    both with the transition count as weight. `a → b` and `b → a` remain
//!    two separate votes. Self-loops are not votes.
//! 2. Every node starts in its own community (its node index).
//! 3. Each pass visits nodes in graph order. A node with neighbors tallies
//!    its neighbors' *current* communities by weight and moves to the
//!    heaviest one. On a tie the node stays put if its current community is
//!    among the heaviest; otherwise the first heaviest community encountered
//!    wins. Updates apply immediately, so later nodes in the same pass see
//!    them.
//! 4. Stop when a pass changes nothing, or after `max_iterations` passes.
//! 5. Renumber communities densely from 0 in order of first appearance,
//!    scanning nodes in graph order.
//!
//! Nodes without neighbors keep a singleton community.
//!
//! # Determinism
//!
//! There is no randomness: processing order, tie-breaking and renumbering
//! are all fixed, so the exact community ids are reproducible.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::build::TransitionGraph;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for community detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityConfig {
    /// Maximum number of propagation passes.
    /// Default: 100
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

const fn default_max_iterations() -> usize {
    100
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result of community detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityResult {
    /// Label → community id, ids dense in `0..num_communities`.
    pub assignments: HashMap<String, usize>,
    /// Number of distinct communities.
    pub num_communities: usize,
    /// Number of passes performed.
    pub iterations: usize,
    /// Whether a pass completed without any reassignment.
    pub converged: bool,
}

impl CommunityResult {
    /// Get the community for a label.
    #[must_use]
    pub fn community(&self, label: &str) -> Option<usize> {
        self.assignments.get(label).copied()
    }

    /// Labels in a community, sorted.
    #[must_use]
    pub fn members(&self, community_id: usize) -> Vec<&str> {
        let mut members: Vec<&str> = self
            .assignments
            .iter()
            .filter(|&(_, &c)| c == community_id)
            .map(|(label, _)| label.as_str())
            .collect();
        members.sort_unstable();
        members
    }

    /// Size of each community, indexed by community id.
    #[must_use]
    pub fn community_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_communities];
        for &c in self.assignments.values() {
            if let Some(size) = sizes.get_mut(c) {
                *size += 1;
            }
        }
        sizes
    }

    /// Check if two labels are in the same community.
    #[must_use]
    pub fn same_community(&self, a: &str, b: &str) -> bool {
        match (self.community(a), self.community(b)) {
            (Some(c1), Some(c2)) => c1 == c2,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Partition the graph into communities, starting from singletons.
#[must_use]
#[instrument(skip(graph, config))]
pub fn detect_communities(graph: &TransitionGraph, config: &CommunityConfig) -> CommunityResult {
    let initial: Vec<usize> = (0..graph.node_count()).collect();
    propagate(graph, initial, config)
}

/// Partition the graph starting from a caller-supplied assignment.
///
/// Labels missing from `seed` start in fresh singleton communities. Seeding
/// with the assignments of a converged [`CommunityResult`] for the same
/// graph reproduces that result.
#[must_use]
#[instrument(skip(graph, seed, config))]
pub fn detect_communities_seeded(
    graph: &TransitionGraph,
    seed: &HashMap<String, usize>,
    config: &CommunityConfig,
) -> CommunityResult {
    // Seed ids are renumbered densely below `n`; unseeded node `i` gets `n + i`.
    let n = graph.node_count();
    let mut dense: HashMap<usize, usize> = HashMap::new();
    let initial: Vec<usize> = graph
        .nodes()
        .enumerate()
        .map(|(i, node)| match seed.get(&node.label) {
            Some(&id) => {
                let next_id = dense.len();
                *dense.entry(id).or_insert(next_id)
            }
            None => n + i,
        })
        .collect();
    propagate(graph, initial, config)
}

fn propagate(
    graph: &TransitionGraph,
    mut labels: Vec<usize>,
    config: &CommunityConfig,
) -> CommunityResult {
    let n = graph.node_count();
    if n == 0 {
        return CommunityResult {
            assignments: HashMap::new(),
            num_communities: 0,
            iterations: 0,
            converged: true,
        };
    }

    let neighbors = undirected_neighbors(graph);

    // (community, accumulated weight) in order of first encounter.
    let mut tally: Vec<(usize, u64)> = Vec::new();
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        let mut changed = false;

        for i in 0..n {
            if neighbors[i].is_empty() {
                continue;
            }

            tally.clear();
            for &(j, weight) in &neighbors[i] {
                let community = labels[j];
                if let Some(entry) = tally.iter_mut().find(|(c, _)| *c == community) {
                    entry.1 += weight;
                } else {
                    tally.push((community, weight));
                }
            }

            let current = labels[i];
            let mut best = current;
            let mut best_weight = tally
                .iter()
                .find(|(c, _)| *c == current)
                .map_or(0, |&(_, w)| w);
            for &(community, weight) in &tally {
                if weight > best_weight {
                    best = community;
                    best_weight = weight;
                }
            }

            if best != current {
                labels[i] = best;
                changed = true;
            }
        }

        if !changed {
            converged = true;
            break;
        }
    }

    // Renumber communities to be contiguous starting from 0.
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let assignments: HashMap<String, usize> = graph
        .index_labels()
        .into_iter()
        .zip(&labels)
        .map(|(label, community)| {
            let next_id = remap.len();
            let id = *remap.entry(*community).or_insert(next_id);
            (label.to_string(), id)
        })
        .collect();

    let num_communities = remap.len();
    debug!(num_communities, iterations, converged, "label propagation finished");

    CommunityResult {
        assignments,
        num_communities,
        iterations,
        converged,
    }
}

/// Undirected weighted neighbor lists, in edge order.
fn undirected_neighbors(graph: &TransitionGraph) -> Vec<Vec<(usize, u64)>> {
    let g = graph.graph();
    let mut neighbors: Vec<Vec<(usize, u64)>> = vec![Vec::new(); g.node_count()];
    for edge in g.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a == b {
            continue;
        }
        let weight = u64::from(*edge.weight());
        neighbors[a].push((b, weight));
        neighbors[b].push((a, weight));
    }
    neighbors
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
