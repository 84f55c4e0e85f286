//! Progress source seam
//!
//! Sessions fetch snapshots through this trait rather than from
//! [`BrunelClient`] directly, so tests can drive them with scripted fakes.

use async_trait::async_trait;

use brunel_client::{BrunelClient, ClientError};
use brunel_core::domain::progress::JobProgress;

/// Anything that can serve delta-fetched progress snapshots.
#[async_trait]
pub trait ProgressSource: Send + Sync {
    /// Fetches a snapshot holding log entries newer than `since_millis`.
    /// `0` means the full history.
    async fn fetch_progress(
        &self,
        job_id: &str,
        since_millis: u64,
    ) -> Result<JobProgress, ClientError>;
}

#[async_trait]
impl ProgressSource for BrunelClient {
    async fn fetch_progress(
        &self,
        job_id: &str,
        since_millis: u64,
    ) -> Result<JobProgress, ClientError> {
        self.progress(job_id, since_millis).await
    }
}
