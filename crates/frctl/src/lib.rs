//! frctl - manage a versioned architecture graph from the command line.
//!
//! This crate provides the CLI application on top of [`frctl_graph`]:
//! repository initialisation, configuration, graph commands, and text/JSON
//! rendering.

#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
