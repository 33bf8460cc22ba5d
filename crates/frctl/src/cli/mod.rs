//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for frctl using clap's
//! derive API. Each command has its own argument struct with validation.
//!
//! # Commands
//!
//! - `init`: Initialize a new frctl repository
//! - `show`: Show statistics, nodes, and edges
//! - `add-node` / `add-edge`: Grow the graph
//! - `remove-node` / `remove-edge`: Shrink the graph
//! - `validate`: Check graph integrity
//! - `export`: Write the canonical JSON document
//! - `stats`: Show counts, depth, and the Merkle hash
//! - `order`, `ancestors`, `descendants`: Query dependency order
//! - `hash`: Print the Merkle hash
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! frctl add-node service "Billing API"
//! frctl add-node schema invoices --id pkg:acme/invoices@v2
//! frctl add-edge pkg:frctl/billing-api@local pkg:acme/invoices@v2 --type CONSUMES
//! frctl order
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use execute::Direction;

pub use args::{
    AddEdgeArgs, AddNodeArgs, ExportArgs, HashArgs, InitArgs, OrderArgs, RemoveEdgeArgs,
    RemoveNodeArgs, ShowArgs, StatsArgs, TraversalArgs, ValidateArgs,
};

pub use types::{EdgeKindArg, NodeKindArg};

pub use validators::{parse_metadata_entry, validate_name, validate_namespace, validate_node_id};

/// frctl - architecture graph management
///
/// Track services, libraries, schemas, and endpoints as a versioned,
/// acyclic dependency graph stored in `.frctl/graph.json`.
#[derive(Parser, Debug)]
#[command(name = "frctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new frctl repository
    ///
    /// Creates the `.frctl/` directory with configuration and an empty graph.
    Init(InitArgs),

    /// Display the graph
    ///
    /// Shows summary statistics, then every node and edge in canonical order.
    Show(ShowArgs),

    /// Add a node to the graph
    ///
    /// The id is generated from the name in the configured namespace unless
    /// `--id` is given.
    AddNode(AddNodeArgs),

    /// Add an edge between two existing nodes
    ///
    /// Rejected if it would create a cycle.
    AddEdge(AddEdgeArgs),

    /// Remove a node and every edge touching it
    RemoveNode(RemoveNodeArgs),

    /// Remove all edges from source to target
    RemoveEdge(RemoveEdgeArgs),

    /// Validate graph integrity
    ///
    /// Exits with a non-zero status when problems are found.
    Validate(ValidateArgs),

    /// Export the graph as canonical JSON
    Export(ExportArgs),

    /// Show graph statistics
    Stats(StatsArgs),

    /// List nodes in dependency order
    Order(OrderArgs),

    /// List every node with a path to the given node
    Ancestors(TraversalArgs),

    /// List every node reachable from the given node
    Descendants(TraversalArgs),

    /// Print the Merkle hash of the graph
    Hash(HashArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args, output_mode).await,
            Some(Commands::Show(_)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_show(&app, output_mode).await
            }
            Some(Commands::AddNode(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_add_node(&mut app, args, output_mode).await
            }
            Some(Commands::AddEdge(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_add_edge(&mut app, args, output_mode).await
            }
            Some(Commands::RemoveNode(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_remove_node(&mut app, args, output_mode).await
            }
            Some(Commands::RemoveEdge(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_remove_edge(&mut app, args, output_mode).await
            }
            Some(Commands::Validate(_)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_validate(&app, output_mode).await
            }
            Some(Commands::Export(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_export(&app, args, output_mode).await
            }
            Some(Commands::Stats(_)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_stats(&app, output_mode).await
            }
            Some(Commands::Order(_)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_order(&app, output_mode).await
            }
            Some(Commands::Ancestors(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_traversal(&app, args, Direction::Ancestors, output_mode).await
            }
            Some(Commands::Descendants(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_traversal(&app, args, Direction::Descendants, output_mode).await
            }
            Some(Commands::Hash(_)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_hash(&app, output_mode).await
            }
            None => {
                println!("frctl architecture graph");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
