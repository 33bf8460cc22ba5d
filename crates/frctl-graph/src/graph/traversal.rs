//! Graph algorithms over a read-only petgraph view.
//!
//! The engine stores nodes in an id map and edges in a flat list. Every
//! algorithm here builds a borrowed [`DiGraphMap`] view from that state and
//! never mutates it, which is what lets `add_edge` check a candidate edge
//! before committing it.
//!
//! # Edge Direction
//!
//! Edges point from **source to target**. Ancestors of `x` are the nodes with
//! a path *to* `x`; descendants are the nodes reachable *from* `x`.

use crate::domain::{Edge, Node, NodeId};
use petgraph::algo;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::{Dfs, Reversed, Walker};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap};

/// Borrowed adjacency view of the graph.
///
/// Parallel edges collapse into one arc, which is all reachability needs.
/// Endpoints missing from `nodes` still get a vertex so `validate` can look
/// at inconsistent data without panicking.
pub(super) type View<'a> = DiGraphMap<&'a str, ()>;

pub(super) fn build_view<'a>(nodes: &'a BTreeMap<NodeId, Node>, edges: &'a [Edge]) -> View<'a> {
    let mut view = View::with_capacity(nodes.len(), edges.len());
    for id in nodes.keys() {
        view.add_node(id.as_str());
    }
    for edge in edges {
        view.add_edge(edge.source().as_str(), edge.target().as_str(), ());
    }
    view
}

/// Whether adding `source -> target` would close a cycle.
///
/// That is the case exactly when `target` can already reach `source`
/// through existing edges (or the edge is a self-loop).
pub(super) fn would_create_cycle(view: &View<'_>, source: &str, target: &str) -> bool {
    source == target || algo::has_path_connecting(view, target, source, None)
}

pub(super) fn is_cyclic(view: &View<'_>) -> bool {
    algo::is_cyclic_directed(view)
}

/// Topological order via Kahn's algorithm.
///
/// Among nodes whose dependencies are all placed, the smallest id goes
/// next, so the order is a pure function of graph content. Edges with an
/// endpoint outside `nodes` are ignored.
///
/// Returns `None` if the graph contains a cycle.
pub(super) fn topological_order(
    nodes: &BTreeMap<NodeId, Node>,
    edges: &[Edge],
) -> Option<Vec<NodeId>> {
    let mut in_degree: HashMap<&str, usize> =
        nodes.keys().map(|id| (id.as_str(), 0)).collect();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();

    for edge in edges {
        let (source, target) = (edge.source().as_str(), edge.target().as_str());
        if !in_degree.contains_key(source) {
            continue;
        }
        let Some(degree) = in_degree.get_mut(target) else {
            continue;
        };
        *degree += 1;
        successors.entry(source).or_default().push(target);
    }

    let mut ready: BinaryHeap<Reverse<&str>> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(id, _)| Reverse(*id))
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(Reverse(id)) = ready.pop() {
        order.push(NodeId::new(id));
        for &next in successors.get(id).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(next));
                }
            }
        }
    }

    (order.len() == nodes.len()).then_some(order)
}

/// All nodes reachable from `start`, excluding `start` itself.
pub(super) fn reachable_from<'a>(view: &View<'a>, start: &'a str) -> BTreeSet<&'a str> {
    Dfs::new(view, start)
        .iter(view)
        .filter(|id| *id != start)
        .collect()
}

/// All nodes that can reach `start`, excluding `start` itself.
pub(super) fn reaching<'a>(view: &View<'a>, start: &'a str) -> BTreeSet<&'a str> {
    let reversed = Reversed(view);
    Dfs::new(reversed, start)
        .iter(reversed)
        .filter(|id| *id != start)
        .collect()
}

/// Number of edges on the longest path, given a topological order.
pub(super) fn longest_path_len(order: &[NodeId], edges: &[Edge]) -> usize {
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        successors
            .entry(edge.source().as_str())
            .or_default()
            .push(edge.target().as_str());
    }

    let mut distance: HashMap<&str, usize> = HashMap::with_capacity(order.len());
    let mut longest = 0;

    for id in order {
        let here = distance.get(id.as_str()).copied().unwrap_or(0);
        longest = longest.max(here);
        for &next in successors.get(id.as_str()).into_iter().flatten() {
            let entry = distance.entry(next).or_insert(0);
            *entry = (*entry).max(here + 1);
        }
    }

    longest
}
