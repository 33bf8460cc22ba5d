//! Error types for graph engine operations.
//!
//! Every variant's `Display` text is meant to be shown to users as-is.

use crate::domain::NodeId;
use std::io;
use thiserror::Error;

/// The error type for graph engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A node with this id is already present in the graph.
    #[error("Node with ID '{0}' already exists")]
    DuplicateNode(NodeId),

    /// An operation referenced a node id that is not in the graph.
    #[error("Node '{0}' not found")]
    NodeNotFound(NodeId),

    /// Inserting the edge `from -> to` would close a cycle.
    #[error("Adding edge {from} -> {to} would create a cycle")]
    CycleDetected {
        /// Source of the rejected edge.
        from: NodeId,
        /// Target of the rejected edge.
        to: NodeId,
    },

    /// The graph already contains a cycle.
    #[error("Graph contains cycles")]
    CyclicGraph,

    /// A required string field was empty or whitespace-only.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// A serialized graph document could not be accepted.
    #[error("Malformed graph data: {0}")]
    MalformedData(String),

    /// IO error while reading or writing a stored graph.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error reports a cycle, either on insertion or in an
    /// existing graph.
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. } | Self::CyclicGraph)
    }
}

/// A specialized Result type for graph engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_classification() {
        let err = Error::CycleDetected {
            from: NodeId::new("a"),
            to: NodeId::new("b"),
        };
        assert!(err.is_cycle());
        assert!(Error::CyclicGraph.is_cycle());
        assert!(!Error::NodeNotFound(NodeId::new("a")).is_cycle());
    }

    #[test]
    fn test_messages_are_user_facing() {
        let err = Error::CycleDetected {
            from: NodeId::new("a"),
            to: NodeId::new("b"),
        };
        assert_eq!(err.to_string(), "Adding edge a -> b would create a cycle");
        assert_eq!(
            Error::DuplicateNode(NodeId::new("x")).to_string(),
            "Node with ID 'x' already exists"
        );
        assert_eq!(Error::EmptyField("Node name").to_string(), "Node name cannot be empty");
    }
}
