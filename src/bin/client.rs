//! # Client Binary Entry Point
//!
//! Sends a single message to the gateway and prints the outcome as JSON.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin client -- --text "hello"
//! cargo run --bin client -- --action '{"type":"ping"}'
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::{json, Value};

use bot_gateway::client::{ClientConfig, GatewayClient};
use bot_gateway::common::config::load_config_or_default;
use bot_gateway::logging::init_logger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the client configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gateway WebSocket URL, overriding the config file
    #[arg(short, long)]
    url: Option<String>,

    /// Reply timeout in milliseconds, overriding the config file
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Send a chat message with this text
    #[arg(short, long, conflicts_with = "action")]
    text: Option<String>,

    /// Send this raw JSON action instead of a chat message
    #[arg(long)]
    action: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger("warn");

    let args = Args::parse();

    let mut config: ClientConfig = load_config_or_default(args.config.as_deref())?;
    if let Some(url) = args.url {
        config.client.url = url;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.client.timeout_ms = timeout_ms;
    }

    let action: Value = match (args.text, args.action) {
        (_, Some(raw)) => serde_json::from_str(&raw).context("--action is not valid JSON")?,
        (Some(text), None) => json!({"type": "chat", "text": text}),
        (None, None) => anyhow::bail!("one of --text or --action is required"),
    };

    let client = GatewayClient::from_config(&config.client);
    let outcome = client.execute_action(action).await;

    println!("{}", outcome.into_value());
    Ok(())
}
