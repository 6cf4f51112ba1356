//! Error types for graph construction and analysis configuration.

/// Invalid input to a graph operation.
///
/// These are programmer errors (malformed upstream data or a bad config
/// value), never transient conditions. Validation always happens before any
/// computation starts, so no partial results accompany an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// The builder was handed zero items; a graph needs at least one node.
    #[error("empty input: a transition graph needs at least one item")]
    EmptyInput,

    /// PageRank damping must lie in `(0, 1]`.
    #[error("invalid damping factor {0}: must be in (0, 1]")]
    InvalidDamping(f64),

    /// PageRank needs at least one iteration.
    #[error("invalid iteration count: must be at least 1")]
    ZeroIterations,
}
