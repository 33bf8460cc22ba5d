//! frctl CLI binary.

use anyhow::Result;
use frctl::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the frctl CLI.
///
/// Uses tokio's current_thread runtime: every command is a short,
/// sequential load-mutate-save cycle.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=frctl=debug,frctl_graph=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("frctl=info,frctl_graph=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting frctl CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("frctl CLI completed successfully");
    Ok(())
}
