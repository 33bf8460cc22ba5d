//! Error types for frctl CLI operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for frctl CLI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No `.frctl/` directory was found from the working directory upwards.
    #[error("Not a frctl repository (or any parent). Run 'frctl init' first.")]
    NotInitialized,

    /// The repository exists but its graph file does not.
    #[error("No graph found at '{}'. Run 'frctl init' to create one.", .0.display())]
    GraphMissing(PathBuf),

    /// `frctl init` found an existing `.frctl/` directory.
    #[error("frctl is already initialized. Found existing '{}'", .0.display())]
    AlreadyInitialized(PathBuf),

    /// A graph engine operation failed.
    #[error(transparent)]
    Graph(#[from] frctl_graph::Error),
}

/// A specialized Result type for frctl operations.
pub type Result<T> = std::result::Result<T, Error>;
