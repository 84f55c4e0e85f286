//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod container;
mod job;

pub use container::ContainerCommands;
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Job management
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Container inspection
    Container {
        #[command(subcommand)]
        command: ContainerCommands,
    },
}

/// Route a top-level command to its handler
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Container { command } => {
            container::handle_container_command(command, config).await
        }
    }
}
