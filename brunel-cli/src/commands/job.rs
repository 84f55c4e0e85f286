//! Job command handlers
//!
//! Handles job inspection, cancellation, rescheduling and live log
//! streaming.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use brunel_core::domain::job::Job;
use brunel_core::domain::progress::JobProgress;
use brunel_core::domain::state::JobState;
use brunel_watch::{JobWatcher, WatchConfig, WatchEvent};

use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Show job details
    Get {
        /// Job ID
        id: String,
    },
    /// Cancel a waiting or running job
    Cancel {
        /// Job ID
        id: String,
    },
    /// Schedule a fresh run for the same commit
    Reschedule {
        /// Job ID
        id: String,
    },
    /// Stream progress and logs until the job finishes
    Watch {
        /// Job ID
        id: String,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    match command {
        JobCommands::Get { id } => get_job(config, &id).await,
        JobCommands::Cancel { id } => cancel_job(config, &id).await,
        JobCommands::Reschedule { id } => reschedule_job(config, &id).await,
        JobCommands::Watch { id } => watch_job(config, &id).await,
    }
}

/// Get and display a single job
async fn get_job(config: &Config, id: &str) -> Result<()> {
    let job = config.client().get_job(id).await?;
    print_job_details(&job);
    Ok(())
}

/// Cancel a job
async fn cancel_job(config: &Config, id: &str) -> Result<()> {
    config.client().cancel_job(id).await?;
    println!("{}", format!("Job {id} cancelled.").yellow());
    Ok(())
}

/// Re-run a job's commit as a new job
async fn reschedule_job(config: &Config, id: &str) -> Result<()> {
    let job = config.client().reschedule_job(id).await?;
    println!(
        "{}",
        format!("Scheduled new job {} for {}.", job.id, job.commit.revision).green()
    );
    Ok(())
}

/// Poll a job and stream its logs until it reaches a terminal state
async fn watch_job(config: &Config, id: &str) -> Result<()> {
    let client = Arc::new(config.client());
    let watcher = JobWatcher::new(client, WatchConfig::from_env()?);
    let mut session = watcher.watch(id);

    let mut printer = LogPrinter::default();
    while let Some(event) = session.next_event().await {
        match event {
            WatchEvent::Progress(progress) => printer.print_new(&progress),
            WatchEvent::Error(err) => eprintln!("{} {err}", "fetch error:".red()),
        }
    }

    if let Some(state) = printer.last_state {
        println!();
        println!("Job finished: {}", colored_job_state(state));
    }

    Ok(())
}

/// Prints only the log lines not yet shown from each merged snapshot.
///
/// Snapshots are cumulative, so remembering how many lines were already
/// printed per stage and per container is enough.
#[derive(Default)]
struct LogPrinter {
    printed_stage_lines: HashMap<String, usize>,
    printed_container_lines: HashMap<String, usize>,
    last_state: Option<JobState>,
}

impl LogPrinter {
    fn print_new(&mut self, progress: &JobProgress) {
        for stage in &progress.stages {
            if !self.printed_stage_lines.contains_key(&stage.id) {
                println!("{}", format!("=== {} ===", stage.id).bold());
            }

            let printed = self.printed_stage_lines.entry(stage.id.clone()).or_insert(0);
            for line in stage.logs.iter().skip(*printed) {
                println!("{}", line.message);
            }
            *printed = stage.logs.len();

            for container in &stage.containers {
                let key = format!("{}/{}", stage.id, container.id);
                let printed = self.printed_container_lines.entry(key).or_insert(0);
                for line in container.logs.iter().skip(*printed) {
                    println!("{} {}", format!("[{}]", container.id).dimmed(), line.message);
                }
                *printed = container.logs.len();
            }
        }

        self.last_state = Some(progress.state);
    }
}

/// Print a job in detail
fn print_job_details(job: &Job) {
    println!("{}", format!("Job {}", job.id).bold());
    println!("  State:     {}", colored_job_state(job.state));
    println!("  Branch:    {}", job.commit.branch);
    println!("  Revision:  {}", job.commit.revision);
    println!("  Started by: {}", job.started_by);
    if let Some(repository) = &job.repository {
        println!("  Repository: {}/{}", repository.project, repository.name);
    }
    println!("  Created:   {}", job.created_at);
    if let Some(started_at) = job.started_at {
        println!("  Started:   {started_at}");
    }
    if let Some(stopped_at) = job.stopped_at {
        println!("  Stopped:   {stopped_at}");
    }
    if let Some(stopped_by) = &job.stopped_by {
        println!("  Stopped by: {stopped_by}");
    }
}

fn colored_job_state(state: JobState) -> ColoredString {
    let label = state.to_string();
    match state {
        JobState::Waiting => label.normal(),
        JobState::Processing => label.cyan(),
        JobState::Success => label.green(),
        JobState::Failed => label.red(),
        JobState::Cancelled => label.yellow(),
    }
}
