//! Command execution logic.
//!
//! Every mutating command loads the graph, applies one engine operation,
//! and saves the graph only if that operation succeeded.

use anyhow::{Context, Result};
use frctl_graph::id_generation::{generate_id_in, validate_id};
use frctl_graph::store::{GraphStore, JsonFileStore};
use frctl_graph::{canonical, Edge, EdgeKind, Metadata, Node, NodeKind};
use std::io;

use super::args::{AddEdgeArgs, AddNodeArgs, ExportArgs, InitArgs, RemoveEdgeArgs, RemoveNodeArgs, TraversalArgs};
use crate::app::App;
use crate::output::{self, GraphStats, OutputConfig, OutputMode};

/// Which way `execute_traversal` walks from its start node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Nodes with a path to the start node
    Ancestors,
    /// Nodes reachable from the start node
    Descendants,
}

impl Direction {
    fn heading(self) -> &'static str {
        match self {
            Self::Ancestors => "Ancestors",
            Self::Descendants => "Descendants",
        }
    }
}

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir, args.namespace.as_deref()).await?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "frctl_dir": result.frctl_dir.display().to_string(),
                "config_file": result.config_file.display().to_string(),
                "graph_file": result.graph_file.display().to_string(),
                "namespace": result.namespace,
            }))?;
        }
        OutputMode::Text if !args.quiet => {
            let config = OutputConfig::from_env();
            println!(
                "{}",
                output::success(
                    &format!("✓ Initialized frctl in {}", result.frctl_dir.display()),
                    &config
                )
            );
            println!("  Config:    {}", result.config_file.display());
            println!("  Graph:     {}", result.graph_file.display());
            println!("  Namespace: {}", result.namespace);
        }
        OutputMode::Text => {}
    }

    Ok(())
}

/// Execute the show command
pub async fn execute_show(app: &App, output_mode: OutputMode) -> Result<()> {
    let graph = app.load_graph().await?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "stats": GraphStats::from_graph(&graph),
                "graph": canonical::to_canonical_value(&graph),
            }))?;
        }
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_graph(&mut handle, &graph, &OutputConfig::from_env())?;
        }
    }

    Ok(())
}

/// Execute the add-node command
pub async fn execute_add_node(
    app: &mut App,
    args: &AddNodeArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let mut graph = app.load_graph().await?;

    let kind = NodeKind::from(args.kind);
    let id = match &args.id {
        Some(id) => {
            if !validate_id(id) {
                tracing::warn!(
                    id = %id,
                    "Node id does not follow the pkg:<namespace>/<slug>@<version> convention"
                );
            }
            id.clone()
        }
        None => generate_id_in(app.namespace(), &args.name),
    };
    let metadata: Metadata = args.metadata.iter().cloned().collect();
    let node = Node::new(&id, kind, &args.name)?.with_metadata(metadata);

    graph.add_node(node.clone())?;
    app.save_graph(&graph).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&node)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!(
                "{}",
                output::success(
                    &format!("✓ Added {} node: {} ({})", kind, node.name(), node.id()),
                    &config
                )
            );
        }
    }

    Ok(())
}

/// Execute the add-edge command
pub async fn execute_add_edge(
    app: &mut App,
    args: &AddEdgeArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let mut graph = app.load_graph().await?;

    let edge = Edge::new(&args.source, &args.target, EdgeKind::from(args.kind))?
        .with_contract(args.contract.as_deref());

    graph.add_edge(edge.clone())?;
    app.save_graph(&graph).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&edge)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!(
                "{}",
                output::success(&format!("✓ Added edge: {}", edge), &config)
            );
        }
    }

    Ok(())
}

/// Execute the remove-node command
pub async fn execute_remove_node(
    app: &mut App,
    args: &RemoveNodeArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let mut graph = app.load_graph().await?;

    let edges_removed = graph.edges().iter().filter(|e| e.touches(&args.id)).count();
    let node = graph.remove_node(&args.id)?;
    app.save_graph(&graph).await?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "removed": node,
                "edges_removed": edges_removed,
            }))?;
        }
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!(
                "{}",
                output::success(
                    &format!("✓ Removed node: {} ({} edges removed)", node.id(), edges_removed),
                    &config
                )
            );
        }
    }

    Ok(())
}

/// Execute the remove-edge command
///
/// Removing an edge that does not exist is not an error; the graph is left
/// untouched and a warning is printed.
pub async fn execute_remove_edge(
    app: &mut App,
    args: &RemoveEdgeArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let mut graph = app.load_graph().await?;

    let removed = graph.remove_edge(&args.source, &args.target);
    if removed > 0 {
        app.save_graph(&graph).await?;
    }

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "source": args.source,
                "target": args.target,
                "removed": removed,
            }))?;
        }
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            if removed == 0 {
                println!(
                    "{}",
                    output::warning(
                        &format!("No edge from {} to {}", args.source, args.target),
                        &config
                    )
                );
            } else {
                println!(
                    "{}",
                    output::success(
                        &format!("✓ Removed edge: {} --> {}", args.source, args.target),
                        &config
                    )
                );
            }
        }
    }

    Ok(())
}

/// Execute the validate command
///
/// A graph file that fails to load is reported as a validation problem
/// rather than a load error. Returns an error when any problem is found so
/// the process exits with a non-zero status.
pub async fn execute_validate(app: &App, output_mode: OutputMode) -> Result<()> {
    let problems = match app.load_graph().await {
        Ok(graph) => graph.validate(),
        Err(crate::error::Error::Graph(frctl_graph::Error::MalformedData(message))) => {
            vec![message]
        }
        Err(e) => return Err(e.into()),
    };

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "valid": problems.is_empty(),
                "errors": problems,
            }))?;
        }
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_validation(&mut handle, &problems, &OutputConfig::from_env())?;
        }
    }

    if !problems.is_empty() {
        anyhow::bail!("Graph has {} validation problem(s)", problems.len());
    }

    Ok(())
}

/// Execute the export command
pub async fn execute_export(app: &App, args: &ExportArgs, output_mode: OutputMode) -> Result<()> {
    let graph = app.load_graph().await?;

    let Some(path) = &args.output else {
        println!("{}", canonical::serialize_pretty(&graph));
        return Ok(());
    };

    JsonFileStore::new(path)
        .save(&graph)
        .await
        .with_context(|| format!("Failed to export graph to {}", path.display()))?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "exported": path.display().to_string(),
                "hash": graph.merkle_hash(),
            }))?;
        }
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!(
                "{}",
                output::success(&format!("✓ Exported graph to {}", path.display()), &config)
            );
        }
    }

    Ok(())
}

/// Execute the stats command
pub async fn execute_stats(app: &App, output_mode: OutputMode) -> Result<()> {
    let graph = app.load_graph().await?;
    let stats = GraphStats::from_graph(&graph);

    match output_mode {
        OutputMode::Json => output::print_json(&stats)?,
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_stats(&mut handle, &stats, &OutputConfig::from_env())?;
        }
    }

    Ok(())
}

/// Execute the order command
pub async fn execute_order(app: &App, output_mode: OutputMode) -> Result<()> {
    let graph = app.load_graph().await?;
    let order = graph.topological_sort()?;
    let nodes = output::nodes_for(&graph, &order);

    match output_mode {
        OutputMode::Json => output::print_json(&nodes)?,
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_node_list(
                &mut handle,
                "Dependency order",
                &nodes,
                &OutputConfig::from_env(),
            )?;
        }
    }

    Ok(())
}

/// Execute the ancestors and descendants commands
pub async fn execute_traversal(
    app: &App,
    args: &TraversalArgs,
    direction: Direction,
    output_mode: OutputMode,
) -> Result<()> {
    let graph = app.load_graph().await?;
    let ids = match direction {
        Direction::Ancestors => graph.get_ancestors(&args.id)?,
        Direction::Descendants => graph.get_descendants(&args.id)?,
    };
    let nodes = output::nodes_for(&graph, &ids);

    match output_mode {
        OutputMode::Json => output::print_json(&nodes)?,
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write_node_list(
                &mut handle,
                &format!("{} of {}", direction.heading(), args.id),
                &nodes,
                &OutputConfig::from_env(),
            )?;
        }
    }

    Ok(())
}

/// Execute the hash command
pub async fn execute_hash(app: &App, output_mode: OutputMode) -> Result<()> {
    let graph = app.load_graph().await?;
    let hash = graph.merkle_hash();

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({ "hash": hash }))?,
        OutputMode::Text => println!("{}", hash),
    }

    Ok(())
}
