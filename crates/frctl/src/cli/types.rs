//! CLI value enums and domain type conversions.

use clap::ValueEnum;
use frctl_graph::{EdgeKind, NodeKind};

/// Node type for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKindArg {
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

impl std::fmt::Display for NodeKindArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", NodeKind::from(*self))
    }
}

impl From<NodeKindArg> for NodeKind {
    fn from(arg: NodeKindArg) -> Self {
        match arg {
            NodeKindArg::Service => NodeKind::Service,
            NodeKindArg::Library => NodeKind::Library,
            NodeKindArg::Schema => NodeKind::Schema,
            NodeKindArg::Endpoint => NodeKind::Endpoint,
            NodeKindArg::Component => NodeKind::Component,
        }
    }
}

/// Edge type for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeKindArg {
    /// Source needs target to build or run
    #[default]
    #[value(name = "DEPENDS_ON", alias = "depends-on")]
    DependsOn,
    /// Source consumes data or calls exposed by target
    #[value(name = "CONSUMES")]
    Consumes,
    /// Source owns target
    #[value(name = "OWNS")]
    Owns,
    /// Source implements the interface described by target
    #[value(name = "IMPLEMENTS")]
    Implements,
}

impl std::fmt::Display for EdgeKindArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", EdgeKind::from(*self))
    }
}

impl From<EdgeKindArg> for EdgeKind {
    fn from(arg: EdgeKindArg) -> Self {
        match arg {
            EdgeKindArg::DependsOn => EdgeKind::DependsOn,
            EdgeKindArg::Consumes => EdgeKind::Consumes,
            EdgeKindArg::Owns => EdgeKind::Owns,
            EdgeKindArg::Implements => EdgeKind::Implements,
        }
    }
}
