//! Job-related API endpoints

use tracing::debug;

use crate::BrunelClient;
use crate::error::Result;
use brunel_core::domain::job::Job;
use brunel_core::domain::progress::JobProgress;

impl BrunelClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The job ID
    ///
    /// # Returns
    /// The job details, including its commit and repository
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let response = self.get(&format!("/api/job/{job_id}")).send().await?;

        self.handle_response(response).await
    }

    /// Cancel a running or waiting job
    ///
    /// # Arguments
    /// * `job_id` - The job ID
    pub async fn cancel_job(&self, job_id: &str) -> Result<()> {
        let response = self.delete(&format!("/api/job/{job_id}")).send().await?;

        self.handle_empty_response(response).await
    }

    /// Schedule a fresh run for the same commit
    ///
    /// # Arguments
    /// * `job_id` - The job to re-run
    ///
    /// # Returns
    /// The newly created job
    pub async fn reschedule_job(&self, job_id: &str) -> Result<Job> {
        let response = self
            .post(&format!("/api/job/{job_id}/reschedule"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Job Progress
    // =============================================================================

    /// Fetch a progress snapshot for a job
    ///
    /// The snapshot always carries the complete current stage/container
    /// shape, but its log arrays hold only entries newer than
    /// `since_millis`. Pass `0` to fetch the full history.
    ///
    /// # Arguments
    /// * `job_id` - The job ID
    /// * `since_millis` - Lower bound for log entries, in epoch milliseconds
    pub async fn progress(&self, job_id: &str, since_millis: u64) -> Result<JobProgress> {
        debug!(job_id, since_millis, "fetching job progress");

        let response = self
            .get(&format!("/api/job/{job_id}/progress"))
            .query(&[("since", since_millis)])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
