// Nessus MCP Tool Gateway
// Main entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use nessus_gateway::backend::BackendClient;
use nessus_gateway::config::{load_config, BackendMode, ConfigOverrides, GatewayConfig};
use nessus_gateway::server::McpServer;
use nessus_gateway::tools::{default_registry, ToolDispatcher};

#[derive(Parser, Debug)]
#[command(name = "nessus-gateway")]
#[command(about = "MCP tool gateway for Nessus vulnerability scanning", version)]
struct Args {
    /// Run mode (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Command>,

    /// Base URL of the Nessus facade; mock mode is used when absent
    #[arg(long = "api-url", global = true)]
    api_url: Option<String>,

    /// Force mock mode even when an API URL is configured
    #[arg(long, global = true)]
    mock: bool,

    /// Config file (default: ~/.nessus-gateway/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve MCP over stdin/stdout
    Serve,
    /// Print the tool descriptors
    Tools,
    /// Dispatch a single tool call and print the result envelope
    Call {
        /// Tool name
        name: String,
        /// Arguments as a JSON object
        arguments: Option<String>,
    },
    /// Check backend health
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let overrides = ConfigOverrides {
        api_url: args.api_url.clone(),
        force_mock: args.mock,
        config_path: args.config.clone(),
    };
    let config = load_config(&overrides)?;

    let client = connect(&config).await?;
    let dispatcher = ToolDispatcher::new(default_registry(client.clone())?);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => McpServer::new(dispatcher).run_stdio().await,
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&dispatcher.list_tools())?);
            Ok(())
        }
        Command::Call { name, arguments } => {
            let arguments: Value = match arguments {
                Some(raw) => serde_json::from_str(&raw)
                    .with_context(|| format!("Arguments are not valid JSON: {}", raw))?,
                None => Value::Null,
            };
            let result = dispatcher.dispatch(&name, arguments).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.is_error {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Status => {
            let status = client.check_api_status().await;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
    }
}

/// Logs go to stderr; stdout carries the protocol stream
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

/// Build the backend client and log in when credentials are configured
async fn connect(config: &GatewayConfig) -> Result<BackendClient> {
    let backend = config.backend.clone();
    match backend.mode() {
        BackendMode::Mock => info!("Starting in mock mode"),
        BackendMode::Real => info!(base_url = %backend.base_url, "Starting against real API"),
    }

    let client = BackendClient::new(backend).context("Failed to create backend client")?;

    if let (BackendMode::Real, Some(credentials)) = (client.mode(), &config.login) {
        // API keys may still authenticate later calls
        if let Err(e) = client.login(credentials).await {
            warn!("Login failed, continuing without session token: {}", e);
        }
    }

    Ok(client)
}
