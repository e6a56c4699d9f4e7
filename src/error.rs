//! Error types for graph construction and queries.

use thiserror::Error;

/// The error type for keyed graph operations.
///
/// Carries the offending key so callers can report exactly which vertex was missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<K> {
    /// A key was referenced that was never added with `add_vertex`.
    #[error("unknown vertex {0:?}")]
    UnknownVertex(K),

    /// Malformed input, e.g. a graph that would exceed the node index space.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// A specialized Result type for keyed graph operations.
pub type Result<T, K> = std::result::Result<T, GraphError<K>>;
