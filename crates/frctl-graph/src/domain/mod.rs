//! Domain types for the architecture graph.
//!
//! Nodes and edges reference each other only by [`NodeId`], never by
//! pointer, so the graph can own them in a plain id map plus an edge list.
//!
//! Both records validate on construction: required strings are trimmed and
//! must be non-empty. Deserialization goes through the same constructors, so
//! loaded documents get identical treatment.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Free-form annotations on nodes, edges, and graphs.
///
/// Values are uninterpreted by the engine and may be any JSON value
/// (string, number, bool, null, nested list or map).
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Unique identifier for a node within a graph.
///
/// Treated as an opaque key. By convention it has the form
/// `pkg:<namespace>/<slug>@<version-tag>` (see [`crate::id_generation`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from a string, as given.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Kind of architectural component a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Deployable service
    Service,

    /// Reusable library
    Library,

    /// Data schema
    Schema,

    /// API endpoint
    Endpoint,

    /// Any other component
    Component,
}

impl NodeKind {
    /// Every node kind, in declaration order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Service,
        NodeKind::Library,
        NodeKind::Schema,
        NodeKind::Endpoint,
        NodeKind::Component,
    ];

    /// The serialized tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Library => "Library",
            Self::Schema => "Schema",
            Self::Endpoint => "Endpoint",
            Self::Component => "Component",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid node type '{}'", s))
    }
}

/// Kind of relationship an edge represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// Source needs target to build or run
    DependsOn,

    /// Source consumes data or calls exposed by target
    Consumes,

    /// Source owns target
    Owns,

    /// Source implements the interface described by target
    Implements,
}

impl EdgeKind {
    /// Every edge kind, in declaration order.
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::DependsOn,
        EdgeKind::Consumes,
        EdgeKind::Owns,
        EdgeKind::Implements,
    ];

    /// The serialized tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DependsOn => "DEPENDS_ON",
            Self::Consumes => "CONSUMES",
            Self::Owns => "OWNS",
            Self::Implements => "IMPLEMENTS",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = String;

    /// Accepts the serialized tag in any case, with `_`, `-`, or no
    /// separator (`DEPENDS_ON`, `depends-on`, `DependsOn`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let squash = |value: &str| -> String {
            value
                .chars()
                .filter(|c| *c != '_' && *c != '-')
                .flat_map(char::to_lowercase)
                .collect()
        };
        let wanted = squash(s.trim());

        Self::ALL
            .into_iter()
            .find(|kind| squash(kind.as_str()) == wanted)
            .ok_or_else(|| format!("invalid edge type '{}'", s))
    }
}

/// A vertex of the architecture graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NodeRecord")]
pub struct Node {
    id: NodeId,

    #[serde(rename = "type")]
    kind: NodeKind,

    name: String,

    /// Free-form annotations, not interpreted by the engine
    pub metadata: Metadata,
}

impl Node {
    /// Create a node, trimming `id` and `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyField`] if either `id` or `name` is empty after
    /// trimming.
    pub fn new(id: impl AsRef<str>, kind: NodeKind, name: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(Error::EmptyField("Node id"));
        }

        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(Error::EmptyField("Node name"));
        }

        Ok(Self {
            id: NodeId::new(id),
            kind,
            name: name.to_string(),
            metadata: Metadata::new(),
        })
    }

    /// Replace the node's metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The node's identity key.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The node's kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The node's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// Wire shape of a node, checked by `Node::new` on the way in.
#[derive(Deserialize)]
struct NodeRecord {
    id: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    name: String,
    #[serde(default)]
    metadata: Metadata,
}

impl TryFrom<NodeRecord> for Node {
    type Error = Error;

    fn try_from(record: NodeRecord) -> Result<Self> {
        Ok(Node::new(record.id, record.kind, record.name)?.with_metadata(record.metadata))
    }
}

/// A directed, typed arc between two nodes
///
/// Endpoints are only checked for existence when the edge is inserted into
/// a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EdgeRecord")]
pub struct Edge {
    source: NodeId,

    target: NodeId,

    #[serde(rename = "edge_type")]
    kind: EdgeKind,

    /// Free-form annotations, not interpreted by the engine
    pub metadata: Metadata,

    contract: Option<String>,
}

impl Edge {
    /// Create an edge, trimming both endpoint ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyField`] if either endpoint is empty after
    /// trimming.
    pub fn new(source: impl AsRef<str>, target: impl AsRef<str>, kind: EdgeKind) -> Result<Self> {
        let source = source.as_ref().trim();
        if source.is_empty() {
            return Err(Error::EmptyField("Edge source"));
        }

        let target = target.as_ref().trim();
        if target.is_empty() {
            return Err(Error::EmptyField("Edge target"));
        }

        Ok(Self {
            source: NodeId::new(source),
            target: NodeId::new(target),
            kind,
            metadata: Metadata::new(),
            contract: None,
        })
    }

    /// Attach a contract reference. Blank values mean "no contract".
    #[must_use]
    pub fn with_contract(mut self, contract: Option<impl AsRef<str>>) -> Self {
        self.contract = contract
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }

    /// Replace the edge's metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Id of the node the edge starts at.
    pub fn source(&self) -> &NodeId {
        &self.source
    }

    /// Id of the node the edge points to.
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// The relationship kind.
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Reference to an external interface definition, if any.
    pub fn contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    /// Whether this edge connects exactly `source -> target`.
    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source.as_str() == source && self.target.as_str() == target
    }

    /// Whether either endpoint is `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.source.as_str() == id || self.target.as_str() == id
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --[{}]--> {}", self.source, self.kind, self.target)
    }
}

/// Wire shape of an edge, checked by `Edge::new` on the way in.
#[derive(Deserialize)]
struct EdgeRecord {
    source: String,
    target: String,
    edge_type: EdgeKind,
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    contract: Option<String>,
}

impl TryFrom<EdgeRecord> for Edge {
    type Error = Error;

    fn try_from(record: EdgeRecord) -> Result<Self> {
        Ok(Edge::new(record.source, record.target, record.edge_type)?
            .with_contract(record.contract)
            .with_metadata(record.metadata))
    }
}
