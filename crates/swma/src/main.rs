//! Main entry point for the Space Weather Monitor.

use anyhow::{Context, Result};
use swma::{execute, load_config, logging_config, Cli};
use swma_common::init_logging;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse_normalized();

    let config = load_config(&cli).context("Failed to load configuration")?;
    init_logging(&logging_config(&config, cli.verbose)).context("Failed to initialise logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting SWMA");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(execute(&cli.command, &config, std::io::stdout()))?;

    Ok(())
}
