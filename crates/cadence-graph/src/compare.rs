//! Pairwise similarity between two transition graphs.
//!
//! # Metrics
//!
//! | Metric         | Compares                                   |
//! |----------------|--------------------------------------------|
//! | `node_jaccard` | sets of labels                             |
//! | `edge_jaccard` | sets of directed `(from, to)` pairs        |
//! | `edge_cosine`  | edge-weight vectors over the union of pairs |
//!
//! All three are in `[0, 1]`. Empty sets and zero-magnitude vectors score
//! 0.0 rather than dividing by zero, so an empty graph is dissimilar to
//! everything, itself included.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::instrument;

use crate::graph::build::TransitionGraph;

/// Similarity scores between two graphs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphComparison {
    pub node_jaccard: f64,
    pub edge_jaccard: f64,
    pub edge_cosine: f64,
}

/// Generic Jaccard similarity: `|A ∩ B| / |A ∪ B|`.
///
/// Returns `0.0` if both sets are empty (to avoid 0/0).
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use cadence_graph::compare::jaccard;
///
/// let a: HashSet<&str> = ["x", "y", "z"].into_iter().collect();
/// let b: HashSet<&str> = ["y", "z", "w"].into_iter().collect();
/// // intersection = {"y","z"} (2), union = {"x","y","z","w"} (4)
/// assert!((jaccard(&a, &b) - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn jaccard<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union_size = a.union(b).count() as f64;
    if union_size == 0.0 {
        0.0
    } else {
        intersection / union_size
    }
}

/// Compare two graphs by node set, edge set and edge weights.
#[must_use]
#[instrument(skip(a, b))]
pub fn compare(a: &TransitionGraph, b: &TransitionGraph) -> GraphComparison {
    let nodes_a: HashSet<&str> = a.nodes().map(|n| n.label.as_str()).collect();
    let nodes_b: HashSet<&str> = b.nodes().map(|n| n.label.as_str()).collect();

    let weights_a = edge_weights(a);
    let weights_b = edge_weights(b);

    let keys_a: HashSet<(String, String)> = weights_a.keys().cloned().collect();
    let keys_b: HashSet<(String, String)> = weights_b.keys().cloned().collect();

    GraphComparison {
        node_jaccard: jaccard(&nodes_a, &nodes_b),
        edge_jaccard: jaccard(&keys_a, &keys_b),
        edge_cosine: cosine(&weights_a, &weights_b),
    }
}

fn edge_weights(graph: &TransitionGraph) -> HashMap<(String, String), f64> {
    graph
        .transitions()
        .map(|t| ((t.from, t.to), f64::from(t.weight)))
        .collect()
}

/// Cosine similarity of two sparse vectors; missing keys weigh 0.
fn cosine(a: &HashMap<(String, String), f64>, b: &HashMap<(String, String), f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(key, wa)| b.get(key).map(|wb| wa * wb))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
