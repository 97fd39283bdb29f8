//! # Gateway Binary Entry Point
//!
//! Thin wrapper that loads configuration and runs the WebSocket gateway.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin gateway -- --config config/gateway.toml
//! ```

use std::path::PathBuf;

use clap::Parser;

use bot_gateway::common::config::load_config_or_default;
use bot_gateway::gateway::{GatewayConfig, GatewayServer};
use bot_gateway::logging::init_logger;

/// Command-line arguments for the gateway binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the gateway configuration file (TOML format)
    ///
    /// Example: config/gateway.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the config file (e.g. 0.0.0.0:3000)
    #[arg(short, long)]
    address: Option<String>,

    /// Log level (trace, debug, info, warn, error), overriding the config file
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // CLI arguments take precedence over the config file
    let mut config: GatewayConfig = load_config_or_default(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.gateway.address = address;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_logger(&config.logging.level);

    let server = GatewayServer::new(config)?;
    log::info!(
        "🚀 Starting bot-gateway on {} (max frame {} bytes)",
        server.config().gateway.address,
        server.config().gateway.max_message_bytes
    );

    server.run().await
}
