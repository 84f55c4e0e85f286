//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::state::JobState;

/// The commit a job was triggered for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Commit {
    pub branch: String,
    pub revision: String,
}

/// The repository a job belongs to. Repository management is entirely
/// server-side; the client only displays these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Repository {
    #[serde(rename = "ID")]
    pub id: String,
    pub project: String,
    pub name: String,
    #[serde(rename = "URI")]
    pub uri: String,
}

/// One CI run, as returned by `GET /api/job/{id}`.
///
/// Jobs are created server-side when a build is triggered and become
/// immutable once they reach a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Job {
    #[serde(rename = "ID")]
    pub id: String,
    pub state: JobState,
    pub commit: Commit,
    pub started_by: String,
    #[serde(default)]
    pub stopped_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stopped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub repository: Option<Repository>,
}
