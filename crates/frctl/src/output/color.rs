//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (completed actions, valid graph)
//!   - Warning:   yellow  (edge kinds, empty results)
//!   - Error:     red     (validation problems)
//!   - Reference: cyan    (node ids)
//!   - Accent:    magenta (node kinds)
//!   - Muted:     dimmed  (field labels, connectors)
//!   - Emphasis:  bold    (section headers)

use colored::Colorize;
use frctl_graph::{EdgeKind, NodeKind};

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Colorize a node id (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Colorize a node kind (magenta), padded to a fixed column width.
pub(crate) fn colorize_node_kind(kind: NodeKind, config: &OutputConfig) -> String {
    let text = format!("{:<10}", kind.as_str());
    if !config.use_colors {
        return text;
    }
    text.magenta().to_string()
}

/// Colorize an edge kind (yellow).
pub(crate) fn colorize_edge_kind(kind: EdgeKind, config: &OutputConfig) -> String {
    if !config.use_colors {
        return kind.as_str().to_string();
    }
    kind.as_str().yellow().to_string()
}

/// Dim text.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Bold text.
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_when_colors_disabled() {
        let config = OutputConfig::new(false);
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(error("bad", &config), "bad");
        assert_eq!(warning("hmm", &config), "hmm");
        assert_eq!(colorize_id("pkg:a/b@local", &config), "pkg:a/b@local");
        assert_eq!(colorize_edge_kind(EdgeKind::Owns, &config), "OWNS");
        assert_eq!(dimmed("x", &config), "x");
        assert_eq!(bold("x", &config), "x");
    }

    #[test]
    fn test_node_kind_is_padded() {
        let config = OutputConfig::new(false);
        assert_eq!(colorize_node_kind(NodeKind::Schema, &config), "Schema    ");
        assert_eq!(colorize_node_kind(NodeKind::Component, &config).len(), 10);
    }
}
