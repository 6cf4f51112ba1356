//! Transition graph module.
//!
//! # Overview
//!
//! This module constructs the petgraph-based directed transition graph from
//! an ordered symbol sequence and provides the graph-shaped analyses that
//! operate on it directly (normalization, cycle enumeration, statistics).
//! The graph feeds into every centrality, community and comparison
//! computation in the crate.
//!
//! ## Pipeline
//!
//! ```text
//! &[SequenceItem]
//!        ↓  build::TransitionGraph::from_sequence()
//! TransitionGraph (nodes = labels, edge weight = transition count)
//!        ├─ normalize::transition_probabilities()
//!        ├─ cycles::enumerate_cycles()
//!        └─ stats::GraphStats::from_graph()
//! ```
//!
//! ## Cache Invalidation
//!
//! [`TransitionGraph::content_hash`] is a BLAKE3 hash of the node and edge
//! sets. Compare it against a stored value to detect when cached analysis
//! results are stale.
//!
//! ## Typical Usage
//!
//! ```rust
//! use cadence_graph::graph::{SequenceItem, TransitionGraph, GraphStats};
//!
//! let items: Vec<SequenceItem> = ["C", "G", "Am", "F", "C"]
//!     .iter()
//!     .map(|label| SequenceItem::new(*label, 0, "maj"))
//!     .collect();
//! let graph = TransitionGraph::from_sequence(&items)?;
//! let stats = GraphStats::from_graph(&graph);
//!
//! assert_eq!(stats.node_count, 4);
//! assert_eq!(stats.edge_count, 4);
//! # Ok::<(), cadence_graph::GraphError>(())
//! ```

pub mod build;
pub mod cycles;
pub mod normalize;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use build::{ChordNode, SequenceItem, Transition, TransitionGraph};
pub use cycles::{DEFAULT_MAX_CYCLE_LENGTH, enumerate_cycles};
pub use normalize::{transition_probabilities, transition_probability};
pub use stats::GraphStats;
