//! Argument structs for each CLI command.

use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use super::types::{EdgeKindArg, NodeKindArg};
use super::validators::{parse_metadata_entry, validate_name, validate_namespace, validate_node_id};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Namespace for generated node ids (`pkg:<namespace>/<slug>@local`)
    ///
    /// Must be 2-40 lowercase letters, digits, or hyphens.
    #[arg(short, long, value_parser = validate_namespace)]
    pub namespace: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {}

/// Arguments for the `add-node` command
#[derive(Parser, Debug, Clone)]
pub struct AddNodeArgs {
    /// Node type
    #[arg(value_enum, ignore_case = true)]
    pub kind: NodeKindArg,

    /// Human-readable node name
    #[arg(value_parser = validate_name)]
    pub name: String,

    /// Explicit node id (generated from the name if omitted)
    #[arg(long, value_parser = validate_node_id)]
    pub id: Option<String>,

    /// Metadata entries (repeatable)
    #[arg(short, long = "meta", value_name = "KEY=VALUE", value_parser = parse_metadata_entry)]
    pub metadata: Vec<(String, Value)>,
}

/// Arguments for the `add-edge` command
#[derive(Parser, Debug, Clone)]
pub struct AddEdgeArgs {
    /// Source node id
    #[arg(value_parser = validate_node_id)]
    pub source: String,

    /// Target node id
    #[arg(value_parser = validate_node_id)]
    pub target: String,

    /// Edge type
    #[arg(short = 't', long = "type", value_enum, ignore_case = true, default_value_t)]
    pub kind: EdgeKindArg,

    /// Path of the contract governing this edge
    #[arg(short, long)]
    pub contract: Option<String>,
}

/// Arguments for the `remove-node` command
#[derive(Parser, Debug, Clone)]
pub struct RemoveNodeArgs {
    /// Node id to remove, along with every edge touching it
    #[arg(value_parser = validate_node_id)]
    pub id: String,
}

/// Arguments for the `remove-edge` command
#[derive(Parser, Debug, Clone)]
pub struct RemoveEdgeArgs {
    /// Source node id
    #[arg(value_parser = validate_node_id)]
    pub source: String,

    /// Target node id
    #[arg(value_parser = validate_node_id)]
    pub target: String,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {}

/// Arguments for the `export` command
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Output file (stdout if omitted)
    pub output: Option<PathBuf>,
}

/// Arguments for the `stats` command
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {}

/// Arguments for the `order` command
#[derive(Parser, Debug, Clone)]
pub struct OrderArgs {}

/// Arguments for the `ancestors` and `descendants` commands
#[derive(Parser, Debug, Clone)]
pub struct TraversalArgs {
    /// Node id to start from
    #[arg(value_parser = validate_node_id)]
    pub id: String,
}

/// Arguments for the `hash` command
#[derive(Parser, Debug, Clone)]
pub struct HashArgs {}
