//! outreach-rs: Nonprofit outreach mailer
//!
//! Serves the directory, draft and send-log HTTP API.

use clap::Parser;
use outreach_rs::api::ApiServer;
use outreach_rs::{delivery, logging, Config};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "outreach-rs")]
#[command(about = "Nonprofit directory and templated outreach mailer", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "OUTREACH_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides server.listen_addr
    #[arg(short, long)]
    listen: Option<String>,

    /// Log level, overrides logging.level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli.listen, cli.log_level);
    config.validate()?;

    // Initialize logging
    logging::init(&config.logging)?;

    info!("Starting outreach-rs v{}", env!("CARGO_PKG_VERSION"));
    match &cli.config {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No config file specified, using defaults and environment"),
    }
    info!("  Listening on: {}", config.server.listen_addr);
    info!("  Sender: {}", config.delivery.from_address);

    let transport = delivery::from_config(&config.delivery);
    let server = ApiServer::new(transport, config.server.listen_addr.clone());

    server.run(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
