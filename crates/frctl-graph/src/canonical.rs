//! Canonical serialization and content hashing.
//!
//! The canonical form is a sorted, deterministic rendering of a graph:
//!
//! - node entries keyed and ordered by id
//! - edges ordered by `(source, target)`, then edge kind, contract, and
//!   metadata, so parallel edges of different kinds land in a fixed order
//! - every JSON object key (graph, node, and edge metadata included) sorted
//!
//! Enum fields are written as their string tags. Two graphs with the same
//! content produce byte-identical output no matter the insertion order, and
//! the [`merkle_hash`] is the SHA-256 of that output.
//!
//! # Wire Format
//!
//! ```json
//! {
//!   "edges": [
//!     {"contract": null, "edge_type": "DEPENDS_ON", "metadata": {}, "source": "a", "target": "b"}
//!   ],
//!   "metadata": {},
//!   "nodes": {
//!     "a": {"id": "a", "metadata": {}, "name": "a", "type": "Service"},
//!     "b": {"id": "b", "metadata": {}, "name": "b", "type": "Library"}
//!   }
//! }
//! ```
//!
//! # Loading
//!
//! [`deserialize`] treats its input as untrusted. Unknown kind tags, missing
//! node or edge fields, blank ids, a `nodes` key that is not exactly its
//! node's trimmed id, a repeated `nodes` key or node id, dangling edge
//! endpoints, and cycles all reject the whole document with
//! [`Error::MalformedData`].

use crate::domain::{Edge, Metadata, Node};
use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// The ordered document a graph serializes to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalGraph {
    /// Graph-level annotations
    #[serde(default)]
    pub metadata: Metadata,

    /// Nodes keyed by id
    #[serde(default, deserialize_with = "unique_nodes")]
    pub nodes: BTreeMap<String, Node>,

    /// Edges in canonical order
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Produce the canonical form of a graph.
pub fn to_canonical_form(graph: &Graph) -> CanonicalGraph {
    CanonicalGraph {
        metadata: graph.metadata().clone(),
        nodes: graph
            .nodes()
            .map(|node| (node.id().to_string(), node.clone()))
            .collect(),
        edges: sorted_edges(graph.edges()).into_iter().cloned().collect(),
    }
}

/// Render the canonical form as a JSON value with every object key sorted.
pub fn to_canonical_value(graph: &Graph) -> Value {
    let nodes: Map<String, Value> = graph
        .nodes()
        .map(|node| (node.id().to_string(), node_value(node)))
        .collect();

    let edges: Vec<Value> = sorted_edges(graph.edges())
        .into_iter()
        .map(edge_value)
        .collect();

    canonical_value(&json!({
        "metadata": metadata_value(graph.metadata()),
        "nodes": Value::Object(nodes),
        "edges": edges,
    }))
}

/// Compact canonical JSON bytes.
pub fn serialize(graph: &Graph) -> Vec<u8> {
    to_canonical_value(graph).to_string().into_bytes()
}

/// Indented canonical JSON, for files people read and diff.
pub fn serialize_pretty(graph: &Graph) -> String {
    format!("{:#}", to_canonical_value(graph))
}

/// SHA-256 of the compact canonical JSON, as 64 lowercase hex characters.
pub fn merkle_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(serialize(graph));
    format!("{:x}", hasher.finalize())
}

/// Load a graph from canonical JSON, re-checking every invariant.
///
/// # Errors
///
/// Returns [`Error::MalformedData`] if the document cannot be parsed, uses
/// unknown kind tags, has blank, mismatched, or repeated ids, or fails
/// [`Graph::validate`].
pub fn deserialize(bytes: &[u8]) -> Result<Graph> {
    let document: CanonicalGraph =
        serde_json::from_slice(bytes).map_err(|e| Error::MalformedData(e.to_string()))?;
    from_canonical_form(document)
}

/// Build a graph from an already-parsed canonical document.
///
/// # Errors
///
/// See [`deserialize`].
pub fn from_canonical_form(document: CanonicalGraph) -> Result<Graph> {
    let mut nodes = BTreeMap::new();
    for (key, node) in document.nodes {
        if key != node.id().as_str() {
            return Err(Error::MalformedData(format!(
                "node key '{}' does not match node id '{}'",
                key,
                node.id()
            )));
        }
        if nodes.contains_key(node.id()) {
            return Err(Error::MalformedData(format!(
                "duplicate node id '{}'",
                node.id()
            )));
        }
        nodes.insert(node.id().clone(), node);
    }

    let graph = Graph::from_parts_unchecked(document.metadata, nodes, document.edges);
    let problems = graph.validate();
    if !problems.is_empty() {
        return Err(Error::MalformedData(problems.join("; ")));
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Loaded canonical graph"
    );
    Ok(graph)
}

/// Deserialize the `nodes` object, rejecting a key that appears twice.
fn unique_nodes<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Node>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueNodes;

    impl<'de> Visitor<'de> for UniqueNodes {
        type Value = BTreeMap<String, Node>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object of nodes keyed by id")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut nodes = BTreeMap::new();
            while let Some((key, node)) = access.next_entry::<String, Node>()? {
                if nodes.contains_key(&key) {
                    return Err(de::Error::custom(format!("duplicate node key '{key}'")));
                }
                nodes.insert(key, node);
            }
            Ok(nodes)
        }
    }

    deserializer.deserialize_map(UniqueNodes)
}

/// Edges in canonical order.
pub(crate) fn sorted_edges(edges: &[Edge]) -> Vec<&Edge> {
    let mut sorted: Vec<&Edge> = edges.iter().collect();
    sorted.sort_by_cached_key(|edge| {
        (
            edge.source().clone(),
            edge.target().clone(),
            edge.kind(),
            edge.contract().map(str::to_string),
            metadata_value(&edge.metadata).to_string(),
        )
    });
    sorted
}

fn node_value(node: &Node) -> Value {
    json!({
        "id": node.id().as_str(),
        "type": node.kind().as_str(),
        "name": node.name(),
        "metadata": metadata_value(&node.metadata),
    })
}

fn edge_value(edge: &Edge) -> Value {
    json!({
        "source": edge.source().as_str(),
        "target": edge.target().as_str(),
        "edge_type": edge.kind().as_str(),
        "metadata": metadata_value(&edge.metadata),
        "contract": edge.contract(),
    })
}

fn metadata_value(metadata: &Metadata) -> Value {
    Value::Object(
        metadata
            .iter()
            .map(|(key, value)| (key.clone(), canonical_value(value)))
            .collect(),
    )
}

/// Copy `value` with every object's keys in ascending order, at any depth.
///
/// `serde_json` keeps insertion order when its `preserve_order` feature is
/// on anywhere in the build, so sorting is done here explicitly.
fn canonical_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, &Value> = map.iter().collect();
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(key, value)| (key.clone(), canonical_value(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical_value).collect()),
        other => other.clone(),
    }
}

impl Graph {
    /// See [`to_canonical_form`].
    pub fn to_canonical_form(&self) -> CanonicalGraph {
        to_canonical_form(self)
    }

    /// See [`merkle_hash`].
    pub fn merkle_hash(&self) -> String {
        merkle_hash(self)
    }
}
