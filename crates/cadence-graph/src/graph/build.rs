//! Transition graph construction from an ordered symbol sequence.
//!
//! # Overview
//!
//! This module folds a time-ordered sequence of labeled items into a
//! [`petgraph`] directed graph suitable for every downstream analysis
//! (centrality metrics, community detection, cycle enumeration, comparison).
//!
//! ## Nodes and Edges
//!
//! Items are grouped by label: each distinct label becomes one
//! [`ChordNode`] carrying the number of times it occurred. The root and
//! quality of the *first* occurrence are retained.
//!
//! Consecutive items `x, y` contribute one observation of the transition
//! `x → y`. Repeated observations of the same ordered pair accumulate into a
//! single edge whose weight is the observation count, so the graph never
//! holds parallel edges. `x → x` (a repeated symbol) is kept as a self-loop.
//!
//! ## Ordering
//!
//! Nodes are indexed in order of first appearance and edges in order of first
//! observation, so the same input always yields the same graph layout.
//!
//! ## Cache Invalidation
//!
//! The graph is associated with a content hash (BLAKE3 over the sorted node
//! and edge sets). Callers can compare the hash against a stored value to
//! skip recomputing analyses for an unchanged input.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// Input and node/edge records
// ---------------------------------------------------------------------------

/// One observed symbol in the input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceItem {
    /// Node label (e.g. `"Am7"`). Items with equal labels share a node.
    pub label: String,
    /// Numeric root/category identifier. Opaque to the algorithms.
    #[serde(default)]
    pub root: i32,
    /// Quality/category string. Opaque to the algorithms.
    #[serde(default)]
    pub quality: String,
}

impl SequenceItem {
    /// Convenience constructor.
    #[must_use]
    pub fn new(label: impl Into<String>, root: i32, quality: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            root,
            quality: quality.into(),
        }
    }
}

/// A distinct label in the graph with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordNode {
    pub label: String,
    pub root: i32,
    pub quality: String,
    /// Number of times this label appeared in the source sequence.
    pub count: u32,
}

/// A directed transition `from → to` observed `weight` times.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

// ---------------------------------------------------------------------------
// TransitionGraph
// ---------------------------------------------------------------------------

/// An immutable directed transition graph.
///
/// Nodes are [`ChordNode`]s; the weight of edge `A → B` is the number of
/// times `B` immediately followed `A`. Node indices are dense (`0..N`), so
/// analyses work on index-addressed vectors and translate back to labels
/// only when building their results.
///
/// There are no mutating methods: once built, a `TransitionGraph` can be
/// shared freely between threads and analyses.
#[derive(Debug, Clone)]
pub struct TransitionGraph {
    graph: DiGraph<ChordNode, u32>,
    node_map: HashMap<String, NodeIndex>,
    content_hash: String,
}

impl TransitionGraph {
    /// Build a [`TransitionGraph`] from an ordered symbol sequence.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyInput`] if `items` is empty.
    #[instrument(skip(items), fields(items = items.len()))]
    pub fn from_sequence(items: &[SequenceItem]) -> Result<Self, GraphError> {
        if items.is_empty() {
            return Err(GraphError::EmptyInput);
        }

        let mut graph = DiGraph::<ChordNode, u32>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();
        let mut sequence: Vec<NodeIndex> = Vec::with_capacity(items.len());

        // Step 1: one node per distinct label, counting occurrences.
        for item in items {
            let idx = *node_map.entry(item.label.clone()).or_insert_with(|| {
                graph.add_node(ChordNode {
                    label: item.label.clone(),
                    root: item.root,
                    quality: item.quality.clone(),
                    count: 0,
                })
            });
            graph[idx].count = graph[idx].count.saturating_add(1);
            sequence.push(idx);
        }

        // Step 2: accumulate consecutive pairs into weighted edges.
        for pair in sequence.windows(2) {
            add_or_bump_edge(&mut graph, pair[0], pair[1], 1);
        }

        let built = Self::assemble(graph, node_map);
        debug!(
            nodes = built.node_count(),
            edges = built.edge_count(),
            "built transition graph from sequence"
        );
        Ok(built)
    }

    /// Build a [`TransitionGraph`] from pre-counted nodes and transitions.
    ///
    /// This is the entry point for callers whose upstream process already
    /// produced node/edge counts. Duplicate node labels keep the first
    /// record's root/quality and add their counts; duplicate transitions
    /// accumulate their weights. Transitions naming a label that is not in
    /// `nodes` are skipped with a warning rather than creating phantom nodes,
    /// and so are zero-weight transitions, which were never observed.
    ///
    /// Unlike [`TransitionGraph::from_sequence`], zero nodes is accepted and
    /// yields the empty graph.
    #[must_use]
    #[instrument(skip(nodes, transitions))]
    pub fn from_parts(
        nodes: impl IntoIterator<Item = ChordNode>,
        transitions: impl IntoIterator<Item = Transition>,
    ) -> Self {
        let mut graph = DiGraph::<ChordNode, u32>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for node in nodes {
            if let Some(&idx) = node_map.get(&node.label) {
                graph[idx].count = graph[idx].count.saturating_add(node.count);
                continue;
            }
            let label = node.label.clone();
            let idx = graph.add_node(node);
            node_map.insert(label, idx);
        }

        for transition in transitions {
            let (Some(&from), Some(&to)) = (
                node_map.get(&transition.from),
                node_map.get(&transition.to),
            ) else {
                warn!(
                    from = %transition.from,
                    to = %transition.to,
                    "skipping transition with unknown endpoint"
                );
                continue;
            };
            if transition.weight == 0 {
                warn!(
                    from = %transition.from,
                    to = %transition.to,
                    "skipping transition with zero weight"
                );
                continue;
            }
            add_or_bump_edge(&mut graph, from, to, transition.weight);
        }

        Self::assemble(graph, node_map)
    }

    /// The graph with no nodes and no edges.
    #[must_use]
    pub fn empty() -> Self {
        Self::assemble(DiGraph::new(), HashMap::new())
    }

    fn assemble(graph: DiGraph<ChordNode, u32>, node_map: HashMap<String, NodeIndex>) -> Self {
        let content_hash = compute_content_hash(&graph);
        Self {
            graph,
            node_map,
            content_hash,
        }
    }

    /// Return the number of distinct labels in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct ordered transitions in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterate nodes in index order (first appearance).
    pub fn nodes(&self) -> impl Iterator<Item = &ChordNode> + '_ {
        self.graph.node_weights()
    }

    /// Iterate transitions in edge order (first observation).
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.graph.edge_references().map(|e| Transition {
            from: self.graph[e.source()].label.clone(),
            to: self.graph[e.target()].label.clone(),
            weight: *e.weight(),
        })
    }

    /// Look up a node by label.
    #[must_use]
    pub fn node(&self, label: &str) -> Option<&ChordNode> {
        self.node_map.get(label).map(|&idx| &self.graph[idx])
    }

    /// Weight of the transition `from → to`, if it was observed.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> Option<u32> {
        let from = self.node_index(from)?;
        let to = self.node_index(to)?;
        self.graph.find_edge(from, to).map(|e| self.graph[e])
    }

    /// Look up the `NodeIndex` for a label.
    #[must_use]
    pub fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.node_map.get(label).copied()
    }

    /// Return the label for a node.
    #[must_use]
    pub fn label(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|n| n.label.as_str())
    }

    /// Read-only view of the underlying petgraph graph.
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<ChordNode, u32> {
        &self.graph
    }

    /// BLAKE3 content hash of the node and edge sets.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Labels indexed by dense node index.
    pub(crate) fn index_labels(&self) -> Vec<&str> {
        self.graph.node_weights().map(|n| n.label.as_str()).collect()
    }
}

impl Default for TransitionGraph {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Add `weight` to the edge `from → to`, creating it if needed.
fn add_or_bump_edge(graph: &mut DiGraph<ChordNode, u32>, from: NodeIndex, to: NodeIndex, weight: u32) {
    if let Some(edge) = graph.find_edge(from, to) {
        graph[edge] = graph[edge].saturating_add(weight);
    } else {
        graph.add_edge(from, to, weight);
    }
}

/// Compute a BLAKE3 hash of the sorted node and edge lists.
fn compute_content_hash(graph: &DiGraph<ChordNode, u32>) -> String {
    let mut nodes: Vec<(&str, u32)> = graph
        .node_weights()
        .map(|n| (n.label.as_str(), n.count))
        .collect();
    nodes.sort_unstable();

    let mut edges: Vec<(&str, &str, u32)> = graph
        .edge_references()
        .map(|e| {
            (
                graph[e.source()].label.as_str(),
                graph[e.target()].label.as_str(),
                *e.weight(),
            )
        })
        .collect();
    edges.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for (label, count) in nodes {
        hasher.update(label.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&count.to_le_bytes());
    }
    hasher.update(b"\x01");
    for (from, to, weight) in edges {
        hasher.update(from.as_bytes());
        hasher.update(b"\x00");
        hasher.update(to.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&weight.to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(labels: &[&str]) -> Vec<SequenceItem> {
        labels
            .iter()
            .map(|l| SequenceItem::new(*l, 0, "maj"))
            .collect()
    }

    fn node(label: &str, count: u32) -> ChordNode {
        ChordNode {
            label: label.to_string(),
            root: 0,
            quality: "maj".to_string(),
            count,
        }
    }

    fn transition(from: &str, to: &str, weight: u32) -> Transition {
        Transition {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        }
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = TransitionGraph::from_sequence(&[]).expect_err("must fail");
        assert_eq!(err, GraphError::EmptyInput);
    }

    #[test]
    fn single_item_is_one_node_no_edges() {
        let graph = TransitionGraph::from_sequence(&seq(&["C"])).expect("build graph");
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node("C").map(|n| n.count), Some(1));
    }

    #[test]
    fn counts_nodes_and_accumulates_edges() {
        let graph = TransitionGraph::from_sequence(&seq(&["A", "B", "A", "B", "C"]))
            .expect("build graph");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.node("A").map(|n| n.count), Some(2));
        assert_eq!(graph.node("B").map(|n| n.count), Some(2));
        assert_eq!(graph.node("C").map(|n| n.count), Some(1));

        assert_eq!(graph.weight("A", "B"), Some(2));
        assert_eq!(graph.weight("B", "A"), Some(1));
        assert_eq!(graph.weight("B", "C"), Some(1));
        assert_eq!(graph.weight("C", "A"), None, "no reverse edge");
    }

    #[test]
    fn first_seen_metadata_is_kept() {
        let items = vec![
            SequenceItem::new("X", 7, "min"),
            SequenceItem::new("Y", 2, "maj"),
            SequenceItem::new("X", 9, "dim"),
        ];
        let graph = TransitionGraph::from_sequence(&items).expect("build graph");
        let x = graph.node("X").expect("X node");
        assert_eq!(x.root, 7);
        assert_eq!(x.quality, "min");
        assert_eq!(x.count, 2);
    }

    #[test]
    fn repeated_symbol_becomes_self_loop() {
        let graph = TransitionGraph::from_sequence(&seq(&["A", "A", "A"])).expect("build graph");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight("A", "A"), Some(2));
    }

    #[test]
    fn node_order_follows_first_appearance() {
        let graph =
            TransitionGraph::from_sequence(&seq(&["G", "C", "G", "D"])).expect("build graph");
        let labels: Vec<&str> = graph.nodes().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["G", "C", "D"]);

        let transitions: Vec<Transition> = graph.transitions().collect();
        assert_eq!(
            transitions,
            vec![
                transition("G", "C", 1),
                transition("C", "G", 1),
                transition("G", "D", 1),
            ]
        );
    }

    #[test]
    fn from_parts_merges_duplicates_and_skips_unknown_endpoints() {
        let graph = TransitionGraph::from_parts(
            vec![node("A", 2), node("B", 1), node("A", 3)],
            vec![
                transition("A", "B", 2),
                transition("A", "B", 1),
                transition("B", "Z", 4),
            ],
        );

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node("A").map(|n| n.count), Some(5));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight("A", "B"), Some(3));
        assert!(graph.node("Z").is_none(), "no phantom node for unknown label");
    }

    #[test]
    fn from_parts_skips_zero_weight_transitions() {
        let graph = TransitionGraph::from_parts(
            vec![node("A", 1), node("B", 1), node("C", 1)],
            vec![transition("A", "B", 0), transition("B", "C", 1)],
        );

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight("A", "B"), None);
        assert_eq!(graph.weight("B", "C"), Some(1));

        // A zero record does not block a later observed one.
        let merged = TransitionGraph::from_parts(
            vec![node("A", 1), node("B", 1)],
            vec![transition("A", "B", 0), transition("A", "B", 2)],
        );
        assert_eq!(merged.weight("A", "B"), Some(2));
    }

    #[test]
    fn from_parts_accepts_zero_nodes() {
        let graph = TransitionGraph::from_parts(Vec::new(), Vec::new());
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.content_hash().starts_with("blake3:"));
    }

    #[test]
    fn content_hash_ignores_insertion_order() {
        let a = TransitionGraph::from_parts(
            vec![node("A", 1), node("B", 1)],
            vec![transition("A", "B", 1), transition("B", "A", 1)],
        );
        let b = TransitionGraph::from_parts(
            vec![node("B", 1), node("A", 1)],
            vec![transition("B", "A", 1), transition("A", "B", 1)],
        );
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn content_hash_changes_with_weights() {
        let once = TransitionGraph::from_sequence(&seq(&["A", "B"])).expect("build graph");
        let twice =
            TransitionGraph::from_sequence(&seq(&["A", "B", "A", "B"])).expect("build graph");
        assert_ne!(once.content_hash(), twice.content_hash());
    }

    #[test]
    fn index_lookup_round_trips() {
        let graph = TransitionGraph::from_sequence(&seq(&["C", "F"])).expect("build graph");
        let idx = graph.node_index("F").expect("F index");
        assert_eq!(graph.label(idx), Some("F"));
        assert!(graph.node_index("G").is_none());
    }
}
