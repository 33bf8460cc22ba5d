//! Save/load boundary for graphs.
//!
//! The engine itself is purely in-memory. This module is the thin adapter
//! persistence collaborators go through: [`GraphStore`] moves whole graphs
//! to and from durable storage in canonical form, and every load re-checks
//! the graph's invariants via [`canonical::deserialize`].
//!
//! # Atomicity
//!
//! [`JsonFileStore`] writes to a sibling temporary file and renames it over
//! the target, so a crash mid-write leaves the previous file intact. The
//! temporary file may be left behind; the next successful save replaces it.

use crate::canonical;
use crate::error::Result;
use crate::graph::Graph;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Durable home for a single graph.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Load the stored graph.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the backing storage cannot be read and
    /// `Error::MalformedData` if its contents are not a valid graph.
    async fn load(&self) -> Result<Graph>;

    /// Replace the stored graph with `graph`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the backing storage cannot be written.
    async fn save(&mut self, graph: &Graph) -> Result<()>;

    /// Whether a graph has been stored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the backing storage cannot be checked.
    async fn exists(&self) -> Result<bool>;
}

/// Graph stored as an indented canonical JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    backup: bool,
}

impl JsonFileStore {
    /// Store the graph at `path`, without backups.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup: false,
        }
    }

    /// Copy the previous file to `<name>.bak` before each save.
    #[must_use]
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Path of the graph file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path the previous version is copied to when backups are on.
    pub fn backup_path(&self) -> PathBuf {
        with_appended_extension(&self.path, "bak")
    }
}

#[async_trait]
impl GraphStore for JsonFileStore {
    async fn load(&self) -> Result<Graph> {
        let bytes = fs::read(&self.path).await?;
        let graph = canonical::deserialize(&bytes)?;
        debug!(path = %self.path.display(), "Loaded graph");
        Ok(graph)
    }

    async fn save(&mut self, graph: &Graph) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        if self.backup && fs::try_exists(&self.path).await? {
            let backup_path = self.backup_path();
            fs::copy(&self.path, &backup_path).await?;
            debug!(backup = %backup_path.display(), "Backed up previous graph");
        }

        let mut contents = canonical::serialize_pretty(graph);
        contents.push('\n');

        let temp_path = with_appended_extension(&self.path, "tmp");
        if let Err(e) = fs::write(&temp_path, contents).await {
            // Best-effort cleanup of temp file
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        fs::rename(&temp_path, &self.path).await?;

        debug!(
            path = %self.path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Saved graph"
        );
        Ok(())
    }

    async fn exists(&self) -> Result<bool> {
        Ok(fs::try_exists(&self.path).await?)
    }
}

/// Graph kept as canonical bytes in memory.
///
/// Loading before the first save yields an empty graph. Useful in tests and
/// for embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    bytes: Option<Vec<u8>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `graph`.
    pub fn with_graph(graph: &Graph) -> Self {
        Self {
            bytes: Some(canonical::serialize(graph)),
        }
    }

    /// The canonical bytes of the last saved graph.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

#[async_trait]
impl GraphStore for InMemoryStore {
    async fn load(&self) -> Result<Graph> {
        match &self.bytes {
            Some(bytes) => canonical::deserialize(bytes),
            None => Ok(Graph::new()),
        }
    }

    async fn save(&mut self, graph: &Graph) -> Result<()> {
        self.bytes = Some(canonical::serialize(graph));
        Ok(())
    }

    async fn exists(&self) -> Result<bool> {
        Ok(self.bytes.is_some())
    }
}

/// `graph.json` + `tmp` -> `graph.json.tmp`; `graph` + `tmp` -> `graph.tmp`.
fn with_appended_extension(path: &Path, suffix: &str) -> PathBuf {
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".");
            new_ext.push(suffix);
            new_ext
        }
        None => OsString::from(suffix),
    };
    path.with_extension(new_extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Node, NodeKind};

    #[test]
    fn test_appended_extension() {
        assert_eq!(
            with_appended_extension(Path::new("dir/graph.json"), "tmp"),
            PathBuf::from("dir/graph.json.tmp")
        );
        assert_eq!(
            with_appended_extension(Path::new("graph"), "bak"),
            PathBuf::from("graph.bak")
        );
    }

    #[tokio::test]
    async fn test_in_memory_store_round_trip() {
        let mut store = InMemoryStore::new();
        assert!(!store.exists().await.unwrap());
        assert_eq!(store.load().await.unwrap().node_count(), 0);

        let mut graph = Graph::new();
        graph
            .add_node(Node::new("a", NodeKind::Library, "a").unwrap())
            .unwrap();
        store.save(&graph).await.unwrap();

        assert!(store.exists().await.unwrap());
        assert_eq!(store.load().await.unwrap(), graph);
    }

    #[tokio::test]
    async fn test_in_memory_store_with_graph() {
        let mut graph = Graph::new();
        graph
            .add_node(Node::new("a", NodeKind::Service, "a").unwrap())
            .unwrap();

        let store = InMemoryStore::with_graph(&graph);
        assert!(store.exists().await.unwrap());
        assert_eq!(store.load().await.unwrap(), graph);
    }
}
