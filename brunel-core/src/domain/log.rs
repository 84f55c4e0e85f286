//! Log domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single log line belonging to a stage or container.
///
/// `message` may carry pre-formatted text with embedded control codes and
/// `log_type` is the server's own classification; the client treats both as
/// opaque and only ever accumulates and displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Log {
    pub message: String,
    #[serde(rename = "Type")]
    pub log_type: i64,
    pub time: DateTime<Utc>,
    #[serde(rename = "StageID", default)]
    pub stage_id: String,
}
