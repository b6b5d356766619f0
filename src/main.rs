use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use apiboard::{ApiboardConfig, Dashboard, logging, web};
use clap::Parser;

/// Local dashboard for a handful of public REST APIs
#[derive(Debug, Parser)]
#[command(name = "apiboard", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        ApiboardConfig::load_from_path(cli.config).with_context(|| "Failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
        config.validate()?;
    }

    logging::init(&config.logging, cli.verbose)?;
    tracing::info!("Starting apiboard {}", apiboard::VERSION);

    let dashboard = Arc::new(Dashboard::from_config(&config)?);
    web::run(&config.server, dashboard).await
}
