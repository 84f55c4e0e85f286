//! Brunel CLI
//!
//! Command-line interface for the Brunel CI server: inspect jobs, cancel or
//! re-run them, stream live build logs and fetch container logs.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "brunel")]
#[command(about = "Brunel CI command line client", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "BRUNEL_SERVER", default_value = "http://localhost:8080")]
    server: String,

    /// Bearer token for authenticated servers
    #[arg(long, env = "BRUNEL_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brunel=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server,
        token: cli.token,
    };

    handle_command(cli.command, &config).await
}
