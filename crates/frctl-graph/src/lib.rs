//! frctl-graph - the architecture graph engine behind `frctl`.
//!
//! This crate maintains a versioned, integrity-checked directed acyclic graph
//! of software architecture components (services, libraries, schemas,
//! endpoints) and their typed relationships.
//!
//! # Overview
//!
//! - [`domain`]: node and edge records, kinds, and free-form metadata
//! - [`graph`]: the [`Graph`] engine that owns nodes and edges and enforces
//!   acyclicity and referential integrity on every mutation
//! - [`canonical`]: sorted, deterministic serialization and the Merkle hash
//! - [`id_generation`]: canonical `pkg:<namespace>/<slug>@local` identifiers
//! - [`store`]: the save/load boundary used by persistence collaborators
//!
//! # Example
//!
//! ```
//! use frctl_graph::{Edge, EdgeKind, Graph, Node, NodeKind};
//!
//! # fn main() -> frctl_graph::Result<()> {
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("pkg:frctl/api@local", NodeKind::Service, "api")?)?;
//! graph.add_node(Node::new("pkg:frctl/db@local", NodeKind::Schema, "db")?)?;
//! graph.add_edge(Edge::new("pkg:frctl/api@local", "pkg:frctl/db@local", EdgeKind::DependsOn)?)?;
//!
//! // The reverse edge would close a cycle and is rejected.
//! let reverse = Edge::new("pkg:frctl/db@local", "pkg:frctl/api@local", EdgeKind::DependsOn)?;
//! assert!(graph.add_edge(reverse).is_err());
//!
//! assert_eq!(graph.topological_sort()?.len(), 2);
//! assert_eq!(graph.merkle_hash().len(), 64);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod canonical;
pub mod domain;
pub mod error;
pub mod graph;
pub mod id_generation;
pub mod store;

pub use domain::{Edge, EdgeKind, Metadata, Node, NodeId, NodeKind};
pub use error::{Error, Result};
pub use graph::Graph;
pub use id_generation::generate_id;
