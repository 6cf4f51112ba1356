#![forbid(unsafe_code)]
//! cadence-graph library.
//!
//! Structural analytics over a directed, weighted transition graph built from
//! a sequence of symbols (chord labels observed over time).
//!
//! # Pipeline
//!
//! ```text
//! &[SequenceItem]
//!        ↓  graph::build::TransitionGraph::from_sequence()
//! TransitionGraph (immutable DiGraph<ChordNode, u32>)
//!        ├─ graph::normalize::transition_probabilities()
//!        ├─ metrics::centrality()            (PageRank + betweenness)
//!        ├─ community::detect_communities()  (weighted label propagation)
//!        ├─ graph::cycles::enumerate_cycles()
//!        ├─ graph::stats::GraphStats::from_graph()
//!        └─ compare::compare(&a, &b)
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Typed [`GraphError`] for invalid algorithm input; `anyhow::Result`
//!   for anything touching the filesystem (config loading).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod community;
pub mod compare;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod report;

pub use community::{CommunityConfig, CommunityResult, detect_communities};
pub use compare::{GraphComparison, compare};
pub use config::{AnalysisConfig, CycleConfig, load_config};
pub use error::GraphError;
pub use graph::{ChordNode, GraphStats, SequenceItem, Transition, TransitionGraph};
pub use metrics::{CentralityResult, PageRankConfig, centrality};
pub use report::AnalysisReport;
