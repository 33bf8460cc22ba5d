//! Implementation of the `init` command.
//!
//! Creates the `.frctl/` directory with a configuration file and an empty
//! graph, and locates an existing repository from any subdirectory.

use crate::config::{
    validate_namespace, FrctlConfig, CONFIG_FILE_NAME, FRCTL_DIR_NAME, GRAPH_FILE_NAME,
};
use crate::error::{Error, Result};
use frctl_graph::id_generation::DEFAULT_NAMESPACE;
use frctl_graph::store::{GraphStore, JsonFileStore};
use frctl_graph::Graph;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Maximum directory depth to traverse when searching for the frctl root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created `.frctl` directory
    pub frctl_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created graph file
    pub graph_file: PathBuf,
    /// The namespace used for generated node ids
    pub namespace: String,
}

/// Initialize a new frctl repository in the given directory.
///
/// # Arguments
///
/// * `base_dir` - The directory where `.frctl/` will be created
/// * `namespace` - Optional namespace for generated ids (defaults to "frctl")
///
/// # Errors
///
/// Returns an error if:
/// - The `.frctl/` directory already exists
/// - The namespace is invalid
/// - File system operations fail
pub async fn init(base_dir: &Path, namespace: Option<&str>) -> Result<InitResult> {
    let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE).trim();
    validate_namespace(namespace)?;

    let frctl_dir = base_dir.join(FRCTL_DIR_NAME);
    if is_initialized(base_dir) {
        return Err(Error::AlreadyInitialized(frctl_dir));
    }

    fs::create_dir_all(&frctl_dir).await?;

    let config_file = frctl_dir.join(CONFIG_FILE_NAME);
    let config = FrctlConfig::new(namespace);
    config.save(&config_file).await?;

    let graph_file = frctl_dir.join(GRAPH_FILE_NAME);
    JsonFileStore::new(&graph_file).save(&Graph::new()).await?;

    tracing::info!(dir = %frctl_dir.display(), namespace, "Initialized frctl repository");

    Ok(InitResult {
        frctl_dir,
        config_file,
        graph_file,
        namespace: namespace.to_string(),
    })
}

/// Check if a directory has been initialized with frctl.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(FRCTL_DIR_NAME).exists()
}

/// Find the frctl root directory by searching up the directory tree.
///
/// Returns the directory containing `.frctl/`, or `None` if no repository
/// is found before the filesystem root or the traversal depth limit.
pub fn find_frctl_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(FRCTL_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
