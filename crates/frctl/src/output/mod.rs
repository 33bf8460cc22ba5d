//! Output formatting for CLI commands.
//!
//! Every command renders either human-readable text or JSON for
//! programmatic use. Text renderers write to any [`Write`] so they can be
//! tested without capturing stdout.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers

pub mod color;

use frctl_graph::{canonical, Edge, Graph, Node, NodeId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::io::{self, Write};

pub use color::{error, success, warning};

use color::{bold, colorize_edge_kind, colorize_id, colorize_node_kind, dimmed};

/// Number of hash characters shown by `frctl show`.
pub const SHORT_HASH_LENGTH: usize = 16;

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Configuration for text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `FRCTL_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create an OutputConfig reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("FRCTL_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Summary numbers reported by `show` and `stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Number of nodes
    pub nodes: usize,
    /// Number of edges
    pub edges: usize,
    /// Longest path length, in edges
    pub depth: usize,
    /// Nodes without incoming edges
    pub roots: usize,
    /// Nodes without outgoing edges
    pub leaves: usize,
    /// Merkle hash of the canonical form
    pub hash: String,
    /// Node counts keyed by node type
    pub by_type: BTreeMap<String, usize>,
}

impl GraphStats {
    /// Compute the statistics of `graph`.
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            depth: graph.depth(),
            roots: graph.roots().len(),
            leaves: graph.leaves().len(),
            hash: graph.merkle_hash(),
            by_type: graph
                .kind_counts()
                .into_iter()
                .map(|(kind, count)| (kind.as_str().to_string(), count))
                .collect(),
        }
    }
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", msg)
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(handle, "{}", json)
}

/// Look up the nodes for `ids`, preserving order and skipping unknown ids.
pub fn nodes_for<'a>(graph: &'a Graph, ids: &[NodeId]) -> Vec<&'a Node> {
    ids.iter().filter_map(|id| graph.get_node(id.as_str())).collect()
}

/// Render the `show` view: statistics, then nodes and edges in canonical order.
pub fn write_graph<W: Write>(w: &mut W, graph: &Graph, config: &OutputConfig) -> io::Result<()> {
    let stats = GraphStats::from_graph(graph);
    let short_hash = stats.hash.get(..SHORT_HASH_LENGTH).unwrap_or(&stats.hash);

    writeln!(w, "{}", bold("Graph Statistics:", config))?;
    writeln!(w, "  Nodes: {}", stats.nodes)?;
    writeln!(w, "  Edges: {}", stats.edges)?;
    writeln!(w, "  Depth: {}", stats.depth)?;
    writeln!(w, "  Hash:  {}...", short_hash)?;

    if graph.node_count() > 0 {
        writeln!(w)?;
        writeln!(w, "{}", bold("Nodes:", config))?;
        for node in graph.nodes() {
            write_node_line(w, node, config)?;
        }
    }

    let form = canonical::to_canonical_form(graph);
    if !form.edges.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Edges:", config))?;
        for edge in &form.edges {
            write_edge_line(w, edge, config)?;
        }
    }

    Ok(())
}

/// Render the `stats` view.
pub fn write_stats<W: Write>(w: &mut W, stats: &GraphStats, config: &OutputConfig) -> io::Result<()> {
    writeln!(w, "{}", bold("Graph Statistics:", config))?;
    writeln!(w, "  Total Nodes: {}", stats.nodes)?;
    writeln!(w, "  Total Edges: {}", stats.edges)?;
    writeln!(w, "  Max Depth:   {}", stats.depth)?;
    writeln!(w, "  Roots:       {}", stats.roots)?;
    writeln!(w, "  Leaves:      {}", stats.leaves)?;
    writeln!(w, "  Merkle Hash: {}", stats.hash)?;

    if !stats.by_type.is_empty() {
        writeln!(w)?;
        writeln!(w, "  {}", bold("Nodes by Type:", config))?;
        for (kind, count) in &stats.by_type {
            writeln!(w, "    {:<10} {}", kind, count)?;
        }
    }

    Ok(())
}

/// Render an ordered list of nodes under a heading.
pub fn write_node_list<W: Write>(
    w: &mut W,
    heading: &str,
    nodes: &[&Node],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} ({})", bold(heading, config), nodes.len())?;
    if nodes.is_empty() {
        writeln!(w, "  {}", dimmed("(none)", config))?;
        return Ok(());
    }
    for (position, node) in nodes.iter().enumerate() {
        writeln!(
            w,
            "  {:>3}. {} {:<20} ({})",
            position + 1,
            colorize_node_kind(node.kind(), config),
            node.name(),
            colorize_id(node.id().as_str(), config)
        )?;
    }
    Ok(())
}

/// Render validation results.
pub fn write_validation<W: Write>(
    w: &mut W,
    problems: &[String],
    config: &OutputConfig,
) -> io::Result<()> {
    if problems.is_empty() {
        return writeln!(w, "{}", success("✓ Graph is valid", config));
    }
    writeln!(w, "{}", error("✗ Graph has validation errors:", config))?;
    for problem in problems {
        writeln!(w, "  - {}", problem)?;
    }
    Ok(())
}

/// One node as a `show` line.
pub fn write_node_line<W: Write>(w: &mut W, node: &Node, config: &OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "  - {} {:<20} ({})",
        colorize_node_kind(node.kind(), config),
        node.name(),
        colorize_id(node.id().as_str(), config)
    )
}

/// One edge as a `show` line.
pub fn write_edge_line<W: Write>(w: &mut W, edge: &Edge, config: &OutputConfig) -> io::Result<()> {
    write!(
        w,
        "  - {} {}{}{} {}",
        colorize_id(edge.source().as_str(), config),
        dimmed("--[", config),
        colorize_edge_kind(edge.kind(), config),
        dimmed("]-->", config),
        colorize_id(edge.target().as_str(), config)
    )?;
    if let Some(contract) = edge.contract() {
        write!(w, " {}", dimmed(&format!("(contract: {})", contract), config))?;
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frctl_graph::{EdgeKind, NodeKind};
    use rstest::{fixture, rstest};

    fn plain() -> OutputConfig {
        OutputConfig::new(false)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[fixture]
    fn graph() -> Graph {
        let mut graph = Graph::new();
        graph
            .add_node(Node::new("pkg:frctl/api@local", NodeKind::Service, "api").unwrap())
            .unwrap();
        graph
            .add_node(Node::new("pkg:frctl/db@local", NodeKind::Schema, "db").unwrap())
            .unwrap();
        graph
            .add_edge(
                Edge::new("pkg:frctl/api@local", "pkg:frctl/db@local", EdgeKind::Consumes)
                    .unwrap()
                    .with_contract(Some("schemas/db.sql")),
            )
            .unwrap();
        graph
    }

    #[rstest]
    #[case::no_color_set(&[("NO_COLOR", "1")], false)]
    #[case::frctl_color_zero(&[("FRCTL_COLOR", "0")], false)]
    #[case::frctl_color_false(&[("FRCTL_COLOR", "FALSE")], false)]
    #[case::frctl_color_on(&[("FRCTL_COLOR", "1")], true)]
    #[case::unset(&[], true)]
    fn test_output_config_from_lookup(#[case] vars: &[(&str, &str)], #[case] expected: bool) {
        let config = OutputConfig::from_lookup(|name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        });
        assert_eq!(config.use_colors, expected);
    }

    #[rstest]
    fn test_stats(graph: Graph) {
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.edges, 1);
        assert_eq!(stats.depth, 1);
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.leaves, 1);
        assert_eq!(stats.hash, graph.merkle_hash());
        assert_eq!(stats.by_type.get("Service"), Some(&1));
        assert_eq!(stats.by_type.get("Schema"), Some(&1));
    }

    #[rstest]
    fn test_write_graph(graph: Graph) {
        let text = render(|w| write_graph(w, &graph, &plain()));
        let short = &graph.merkle_hash()[..SHORT_HASH_LENGTH];

        assert!(text.contains("  Nodes: 2"));
        assert!(text.contains("  Depth: 1"));
        assert!(text.contains(&format!("  Hash:  {}...", short)));
        assert!(text.contains("Service    api"));
        assert!(text.contains(
            "pkg:frctl/api@local --[CONSUMES]--> pkg:frctl/db@local (contract: schemas/db.sql)"
        ));
    }

    #[test]
    fn test_write_graph_empty_has_no_sections() {
        let text = render(|w| write_graph(w, &Graph::new(), &plain()));
        assert!(text.contains("  Nodes: 0"));
        assert!(!text.contains("Nodes:\n"));
        assert!(!text.contains("Edges:\n"));
    }

    #[rstest]
    fn test_write_stats(graph: Graph) {
        let stats = GraphStats::from_graph(&graph);
        let text = render(|w| write_stats(w, &stats, &plain()));
        assert!(text.contains(&format!("Merkle Hash: {}", stats.hash)));
        assert!(text.contains("Nodes by Type:"));
        assert!(text.contains("Schema     1"));
    }

    #[rstest]
    fn test_write_node_list(graph: Graph) {
        let order = graph.topological_sort().unwrap();
        let nodes = nodes_for(&graph, &order);
        let text = render(|w| write_node_list(w, "Order", &nodes, &plain()));

        let api = text.find("pkg:frctl/api@local").unwrap();
        let db = text.find("pkg:frctl/db@local").unwrap();
        assert!(text.starts_with("Order (2)"));
        assert!(api < db);
    }

    #[test]
    fn test_write_node_list_empty() {
        let text = render(|w| write_node_list(w, "Ancestors", &[], &plain()));
        assert_eq!(text, "Ancestors (0)\n  (none)\n");
    }

    #[rstest]
    #[case::valid(vec![], "Graph is valid")]
    #[case::invalid(vec!["Graph contains cycles".to_string()], "  - Graph contains cycles")]
    fn test_write_validation(#[case] problems: Vec<String>, #[case] expected: &str) {
        let text = render(|w| write_validation(w, &problems, &plain()));
        assert!(text.contains(expected));
    }
}
