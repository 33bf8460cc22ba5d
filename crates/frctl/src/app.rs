//! Application context for CLI command execution.
//!
//! [`App`] locates the repository, loads its configuration, and owns the
//! graph store that commands read from and write back to.
//!
//! # Example
//!
//! ```no_run
//! use frctl::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut app = App::from_directory(Path::new(".")).await?;
//!     let graph = app.load_graph().await?;
//!     println!("{} nodes", graph.node_count());
//!     app.save_graph(&graph).await?;
//!     Ok(())
//! }
//! ```

use crate::commands::init::find_frctl_root;
use crate::config::{FrctlConfig, CONFIG_FILE_NAME, FRCTL_DIR_NAME};
use crate::error::{Error, Result};
use frctl_graph::store::{GraphStore, JsonFileStore};
use frctl_graph::Graph;
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
pub struct App {
    /// The graph store (trait object so tests can swap the backend)
    store: Box<dyn GraphStore>,

    /// Path to the `.frctl` directory
    frctl_dir: PathBuf,

    /// Resolved graph file path
    graph_path: PathBuf,

    /// Effective configuration, environment overrides applied
    config: FrctlConfig,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("frctl_dir", &self.frctl_dir)
            .field("graph_path", &self.graph_path)
            .field("config", &self.config)
            .field("store", &"<dyn GraphStore>")
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for `.frctl/`, loads the configuration,
    /// applies environment overrides, and opens the graph file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frctl repository is found in the directory tree
    /// - Configuration cannot be loaded or an override is invalid
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_frctl_root(working_dir).ok_or(Error::NotInitialized)?;
        let frctl_dir = root_dir.join(FRCTL_DIR_NAME);

        let mut config = FrctlConfig::load(&frctl_dir.join(CONFIG_FILE_NAME)).await?;
        config.apply_env_overrides()?;

        let graph_path = config.graph_path(&root_dir);
        let store = JsonFileStore::new(&graph_path).with_backup(config.storage.backup);
        tracing::debug!(graph = %graph_path.display(), "Opened frctl repository");

        Ok(Self {
            store: Box::new(store),
            frctl_dir,
            graph_path,
            config,
        })
    }

    /// Create an App over an arbitrary store.
    pub fn with_store(
        store: Box<dyn GraphStore>,
        frctl_dir: PathBuf,
        graph_path: PathBuf,
        config: FrctlConfig,
    ) -> Self {
        Self {
            store,
            frctl_dir,
            graph_path,
            config,
        }
    }

    /// Load the graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphMissing`] if the store holds no graph, so a
    /// later save never replaces lost state with a fresh graph.
    pub async fn load_graph(&self) -> Result<Graph> {
        if !self.store.exists().await? {
            return Err(Error::GraphMissing(self.graph_path.clone()));
        }
        Ok(self.store.load().await?)
    }

    /// Persist the graph.
    ///
    /// This should be called after any mutating operation.
    pub async fn save_graph(&mut self, graph: &Graph) -> Result<()> {
        self.store.save(graph).await?;
        Ok(())
    }

    /// Namespace for generated node ids.
    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// Path to the `.frctl` directory.
    pub fn frctl_dir(&self) -> &Path {
        &self.frctl_dir
    }

    /// Path to the graph file.
    pub fn graph_path(&self) -> &Path {
        &self.graph_path
    }

    /// Effective configuration.
    pub fn config(&self) -> &FrctlConfig {
        &self.config
    }
}
