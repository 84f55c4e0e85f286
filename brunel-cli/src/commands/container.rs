//! Container command handlers

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Container subcommands
#[derive(Subcommand)]
pub enum ContainerCommands {
    /// Print the full log of a container
    Logs {
        /// Container ID
        id: String,
    },
}

/// Handle container commands
pub async fn handle_container_command(command: ContainerCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        ContainerCommands::Logs { id } => {
            let logs = client.container_logs(&id).await?;
            print!("{logs}");
            Ok(())
        }
    }
}
