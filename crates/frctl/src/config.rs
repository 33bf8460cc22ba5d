//! Configuration management for frctl.
//!
//! Project configuration lives in `.frctl/config.yaml`:
//!
//! ```yaml
//! namespace: frctl
//! storage:
//!   graph-file: .frctl/graph.json
//!   backup: true
//! ```
//!
//! Environment variables take precedence over the file:
//!
//! - `FRCTL_NAMESPACE`: namespace for generated node ids
//! - `FRCTL_GRAPH_FILE`: graph file path, relative to the project root

use crate::error::{Error, Result};
use frctl_graph::id_generation::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the frctl directory
pub const FRCTL_DIR_NAME: &str = ".frctl";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the graph data file
pub const GRAPH_FILE_NAME: &str = "graph.json";

/// Environment variable overriding the namespace
pub const NAMESPACE_ENV: &str = "FRCTL_NAMESPACE";

/// Environment variable overriding the graph file path
pub const GRAPH_FILE_ENV: &str = "FRCTL_GRAPH_FILE";

/// Minimum namespace length
pub const MIN_NAMESPACE_LENGTH: usize = 2;

/// Maximum namespace length
pub const MAX_NAMESPACE_LENGTH: usize = 40;

/// Configuration file structure for frctl
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrctlConfig {
    /// Namespace for generated node ids (`pkg:<namespace>/<slug>@local`)
    pub namespace: String,

    /// Storage configuration
    pub storage: StorageConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Path to the graph file, relative to the project root
    pub graph_file: String,

    /// Keep a `.bak` copy of the previous graph on every save
    #[serde(default = "default_backup")]
    pub backup: bool,
}

fn default_backup() -> bool {
    true
}

impl FrctlConfig {
    /// Create a new configuration with the given namespace
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            storage: StorageConfig {
                graph_file: format!("{}/{}", FRCTL_DIR_NAME, GRAPH_FILE_NAME),
                backup: true,
            },
        }
    }

    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        validate_namespace(&config.namespace)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {}", e)))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Apply environment overrides, reading variables through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(namespace) = present(NAMESPACE_ENV) {
            let namespace = namespace.trim();
            validate_namespace(namespace)?;
            tracing::debug!(namespace, "Namespace overridden from environment");
            self.namespace = namespace.to_string();
        }

        if let Some(graph_file) = present(GRAPH_FILE_ENV) {
            tracing::debug!(graph_file = %graph_file, "Graph file overridden from environment");
            self.storage.graph_file = graph_file.trim().to_string();
        }

        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Absolute path of the graph file for a project rooted at `root_dir`.
    pub fn graph_path(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.storage.graph_file)
    }
}

impl Default for FrctlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

/// Validate a namespace.
///
/// Requirements:
/// - 2-40 characters
/// - Lowercase ASCII letters, digits, and hyphens only
///
/// Note: Expects pre-trimmed input.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.len() < MIN_NAMESPACE_LENGTH {
        return Err(Error::Config(format!(
            "Namespace must be at least {} characters",
            MIN_NAMESPACE_LENGTH
        )));
    }

    if namespace.len() > MAX_NAMESPACE_LENGTH {
        return Err(Error::Config(format!(
            "Namespace cannot exceed {} characters",
            MAX_NAMESPACE_LENGTH
        )));
    }

    if !namespace
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(Error::Config(
            "Namespace must contain only lowercase letters, digits, and hyphens".to_string(),
        ));
    }

    Ok(())
}
