//! The graph engine.
//!
//! [`Graph`] is the sole authority for node and edge mutation. It stores
//! nodes in an id-keyed map and edges in a flat list, and it keeps two
//! invariants true after every successful call:
//!
//! - every edge references two nodes present in the graph
//! - the edges, read as a directed graph over node ids, contain no cycle
//!
//! Each mutation either fully succeeds or fails without touching state.
//! `add_edge` checks the candidate edge against a read-only view of the
//! current edges before appending it, so there is never anything to roll
//! back.
//!
//! # Concurrency
//!
//! The graph is a single-owner, synchronous structure. Embedders that need
//! shared access should wrap the whole value in one lock: cycle checks and
//! ancestor queries read the entire edge set.
//!
//! # Performance Characteristics
//!
//! - `add_node`, `get_node`, `remove_node` lookup: O(log n)
//! - `add_edge`: O(n + e) reachability check
//! - `remove_node`: O(e) to cascade edges
//! - Ordering, traversal, depth, validation: O(n + e) plus sorting

mod traversal;

use crate::domain::{Edge, Metadata, Node, NodeId, NodeKind};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// A directed acyclic graph of architecture components.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Nodes indexed by id
    nodes: BTreeMap<NodeId, Node>,

    /// Edges in insertion order
    edges: Vec<Edge>,

    /// Graph-level annotations (environment tag, schema version, ...)
    metadata: Metadata,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph without checking invariants.
    ///
    /// Only the deserializer uses this, and it runs [`Graph::validate`] on
    /// the result before handing it out.
    pub(crate) fn from_parts_unchecked(
        metadata: Metadata,
        nodes: BTreeMap<NodeId, Node>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            nodes,
            edges,
            metadata,
        }
    }

    // ========== Mutation ==========

    /// Insert a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateNode`] if a node with the same id exists.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(Error::DuplicateNode(node.id().clone()));
        }

        debug!(node_id = %node.id(), kind = %node.kind(), "Adding node");
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Insert an edge.
    ///
    /// Multiple edges between the same pair are allowed, including edges of
    /// the same kind.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeNotFound`] if the source or target node is absent
    /// - [`Error::CycleDetected`] if the edge would close a cycle; the graph
    ///   is left unchanged
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        for endpoint in [edge.source(), edge.target()] {
            if !self.nodes.contains_key(endpoint) {
                return Err(Error::NodeNotFound(endpoint.clone()));
            }
        }

        let view = traversal::build_view(&self.nodes, &self.edges);
        if traversal::would_create_cycle(&view, edge.source().as_str(), edge.target().as_str()) {
            warn!(
                source = %edge.source(),
                target = %edge.target(),
                "Rejected edge that would create a cycle"
            );
            return Err(Error::CycleDetected {
                from: edge.source().clone(),
                to: edge.target().clone(),
            });
        }
        drop(view);

        debug!(%edge, "Adding edge");
        self.edges.push(edge);
        Ok(())
    }

    /// Remove a node and every edge that starts or ends at it.
    ///
    /// Returns the removed node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn remove_node(&mut self, id: &str) -> Result<Node> {
        let node = self
            .nodes
            .remove(id)
            .ok_or_else(|| Error::NodeNotFound(NodeId::new(id)))?;

        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(id));

        debug!(
            node_id = id,
            cascaded_edges = before - self.edges.len(),
            "Removed node"
        );
        Ok(node)
    }

    /// Remove every edge from `source` to `target`, whatever its kind.
    ///
    /// Returns the number of edges removed; zero is not an error.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.connects(source, target));
        let removed = before - self.edges.len();

        if removed > 0 {
            debug!(source, target, removed, "Removed edges");
        }
        removed
    }

    // ========== Lookup ==========

    /// Look up a node by id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The first edge from `source` to `target`, in insertion order.
    pub fn get_edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.connects(source, target))
    }

    /// Every edge from `source` to `target`, in insertion order.
    pub fn get_edges(&self, source: &str, target: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|edge| edge.connects(source, target))
            .collect()
    }

    /// Whether a node with this id exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Graph-level metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Mutable access to graph-level metadata.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ========== Queries ==========

    /// Node ids in dependency order: every edge's source comes before its
    /// target. Unconstrained nodes are ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicGraph`] if the graph somehow contains a cycle.
    /// Graphs built through this API never do.
    pub fn topological_sort(&self) -> Result<Vec<NodeId>> {
        traversal::topological_order(&self.nodes, &self.edges).ok_or(Error::CyclicGraph)
    }

    /// All nodes with a path to `id`, in topological order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn get_ancestors(&self, id: &str) -> Result<Vec<NodeId>> {
        let start = self.require(id)?;
        let view = traversal::build_view(&self.nodes, &self.edges);
        let ancestors = traversal::reaching(&view, start.as_str());
        self.in_topological_order(&ancestors)
    }

    /// All nodes reachable from `id`, in topological order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn get_descendants(&self, id: &str) -> Result<Vec<NodeId>> {
        let start = self.require(id)?;
        let view = traversal::build_view(&self.nodes, &self.edges);
        let descendants = traversal::reachable_from(&view, start.as_str());
        self.in_topological_order(&descendants)
    }

    /// Direct successors of `id` (what it points to), sorted by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn dependencies(&self, id: &str) -> Result<Vec<NodeId>> {
        self.require(id)?;
        let targets: BTreeSet<&NodeId> = self
            .edges
            .iter()
            .filter(|edge| edge.source().as_str() == id)
            .map(Edge::target)
            .collect();
        Ok(targets.into_iter().cloned().collect())
    }

    /// Direct predecessors of `id` (what points to it), sorted by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the node is absent.
    pub fn dependents(&self, id: &str) -> Result<Vec<NodeId>> {
        self.require(id)?;
        let sources: BTreeSet<&NodeId> = self
            .edges
            .iter()
            .filter(|edge| edge.target().as_str() == id)
            .map(Edge::source)
            .collect();
        Ok(sources.into_iter().cloned().collect())
    }

    /// Nodes without incoming edges, sorted by id.
    pub fn roots(&self) -> Vec<NodeId> {
        let targets: BTreeSet<&str> = self.edges.iter().map(|e| e.target().as_str()).collect();
        self.nodes
            .keys()
            .filter(|id| !targets.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// Nodes without outgoing edges, sorted by id.
    pub fn leaves(&self) -> Vec<NodeId> {
        let sources: BTreeSet<&str> = self.edges.iter().map(|e| e.source().as_str()).collect();
        self.nodes
            .keys()
            .filter(|id| !sources.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// Build an independent graph holding exactly `ids` and every edge whose
    /// endpoints are both among them. Graph metadata is not carried over.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] for the first id that is absent.
    pub fn extract_subgraph<I, S>(&self, ids: I) -> Result<Graph>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nodes = BTreeMap::new();
        for id in ids {
            let node = self
                .nodes
                .get(id.as_ref())
                .ok_or_else(|| Error::NodeNotFound(NodeId::new(id.as_ref())))?;
            nodes.insert(node.id().clone(), node.clone());
        }

        let edges = self
            .edges
            .iter()
            .filter(|edge| nodes.contains_key(edge.source()) && nodes.contains_key(edge.target()))
            .cloned()
            .collect();

        Ok(Graph {
            nodes,
            edges,
            metadata: Metadata::new(),
        })
    }

    /// Check integrity without failing.
    ///
    /// Returns one human-readable line per problem; an empty list means the
    /// graph is acyclic and every edge references existing nodes.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let view = traversal::build_view(&self.nodes, &self.edges);
        if traversal::is_cyclic(&view) {
            problems.push("Graph contains cycles".to_string());
        }

        for edge in &self.edges {
            if !self.nodes.contains_key(edge.source()) {
                problems.push(format!(
                    "Edge references non-existent source node: {}",
                    edge.source()
                ));
            }
            if !self.nodes.contains_key(edge.target()) {
                problems.push(format!(
                    "Edge references non-existent target node: {}",
                    edge.target()
                ));
            }
        }

        problems
    }

    /// Number of edges on the longest path; 0 for a graph without edges.
    pub fn depth(&self) -> usize {
        let Ok(order) = self.topological_sort() else {
            return 0;
        };
        traversal::longest_path_len(&order, &self.edges)
    }

    /// Node counts per kind, for statistics.
    pub fn kind_counts(&self) -> BTreeMap<NodeKind, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes.values() {
            *counts.entry(node.kind()).or_insert(0) += 1;
        }
        counts
    }

    // ========== Helpers ==========

    fn require(&self, id: &str) -> Result<&NodeId> {
        self.nodes
            .get_key_value(id)
            .map(|(key, _)| key)
            .ok_or_else(|| Error::NodeNotFound(NodeId::new(id)))
    }

    fn in_topological_order(&self, members: &BTreeSet<&str>) -> Result<Vec<NodeId>> {
        Ok(self
            .topological_sort()?
            .into_iter()
            .filter(|id| members.contains(id.as_str()))
            .collect())
    }
}

/// Structural equality: same nodes, same metadata, and the same edges
/// irrespective of insertion order.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.metadata == other.metadata
            && self.edges.len() == other.edges.len()
            && crate::canonical::sorted_edges(&self.edges)
                == crate::canonical::sorted_edges(&other.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EdgeKind;

    fn graph_with(ids: &[&str]) -> Graph {
        let mut graph = Graph::new();
        for id in ids {
            graph
                .add_node(Node::new(id, NodeKind::Service, id).unwrap())
                .unwrap();
        }
        graph
    }

    fn depends(source: &str, target: &str) -> Edge {
        Edge::new(source, target, EdgeKind::DependsOn).unwrap()
    }

    #[test]
    fn test_validate_reports_dangling_edges() {
        let nodes = graph_with(&["a"]).nodes;
        let graph = Graph::from_parts_unchecked(
            Metadata::new(),
            nodes,
            vec![depends("a", "ghost"), depends("phantom", "a")],
        );

        let problems = graph.validate();
        assert_eq!(
            problems,
            vec![
                "Edge references non-existent target node: ghost".to_string(),
                "Edge references non-existent source node: phantom".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate_and_sort_report_cycles() {
        let nodes = graph_with(&["a", "b"]).nodes;
        let graph = Graph::from_parts_unchecked(
            Metadata::new(),
            nodes,
            vec![depends("a", "b"), depends("b", "a")],
        );

        assert_eq!(graph.validate(), vec!["Graph contains cycles".to_string()]);
        assert!(matches!(graph.topological_sort(), Err(Error::CyclicGraph)));
        assert!(graph.get_ancestors("a").unwrap_err().is_cycle());
        assert_eq!(graph.depth(), 0);
    }

    #[test]
    fn test_require_returns_stored_key() {
        let graph = graph_with(&["a"]);
        assert_eq!(graph.require("a").unwrap().as_str(), "a");
        assert!(matches!(graph.require("b"), Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_equality_ignores_edge_order() {
        let mut first = graph_with(&["a", "b", "c"]);
        first.add_edge(depends("a", "b")).unwrap();
        first.add_edge(depends("a", "c")).unwrap();

        let mut second = graph_with(&["c", "b", "a"]);
        second.add_edge(depends("a", "c")).unwrap();
        second.add_edge(depends("a", "b")).unwrap();

        assert_eq!(first, second);

        second.remove_edge("a", "c");
        assert_ne!(first, second);
    }
}
