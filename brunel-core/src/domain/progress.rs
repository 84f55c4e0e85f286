//! Job progress snapshot types
//!
//! `JobProgress` is the shape returned by the delta-fetch endpoint
//! (`GET /api/job/{id}/progress?since=...`): the job state plus the complete
//! current stage list, where the log arrays hold only entries newer than
//! `since`. The merge engine in [`crate::merge`] folds successive snapshots
//! into a full view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::de::null_to_empty;
use crate::domain::log::Log;
use crate::domain::state::{ContainerState, JobState, StageState};

/// Point-in-time view of a job's execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobProgress {
    pub state: JobState,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub stages: Vec<Stage>,
}

impl JobProgress {
    /// Initial accumulator value for a polling session: nothing observed yet.
    pub fn empty() -> Self {
        Self {
            state: JobState::Waiting,
            stages: Vec::new(),
        }
    }

    /// True if this is still the initial accumulator value.
    pub fn is_empty(&self) -> bool {
        self.state == JobState::Waiting && self.stages.is_empty()
    }

    /// Looks up a stage by ID. Stage IDs are unique within a snapshot.
    pub fn stage(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.id == id)
    }
}

/// A named phase of a job's pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stage {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "JobID", default)]
    pub job_id: String,
    pub state: StageState,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stopped_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub logs: Vec<Log>,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub containers: Vec<Container>,
}

impl Stage {
    /// Looks up a container by ID. Container IDs are unique within a stage.
    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|container| container.id == id)
    }
}

/// Extra placement metadata the server attaches to a container record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerMeta {
    #[serde(rename = "StageID", default)]
    pub stage_id: String,
    #[serde(default)]
    pub service: bool,
}

/// A runtime unit (process) executing within a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Container {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "JobID", default)]
    pub job_id: String,
    /// Runtime identifier assigned by the executor backend.
    #[serde(rename = "ContainerID", default)]
    pub container_id: String,
    pub state: ContainerState,
    /// Image/entrypoint/args as defined by the pipeline; opaque here.
    #[serde(default)]
    pub spec: serde_json::Value,
    #[serde(default)]
    pub meta: ContainerMeta,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stopped_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub logs: Vec<Log>,
}
