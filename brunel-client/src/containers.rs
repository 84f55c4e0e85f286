//! Container-related API endpoints

use crate::BrunelClient;
use crate::error::Result;

impl BrunelClient {
    /// Fetch the full log text of a single container
    ///
    /// This is a one-shot, non-incremental fetch, used for containers whose
    /// execution has already completed. Live log streaming goes through the
    /// progress endpoint instead.
    ///
    /// # Arguments
    /// * `container_id` - The container record ID
    pub async fn container_logs(&self, container_id: &str) -> Result<String> {
        let response = self
            .get(&format!("/api/container/{container_id}/logs"))
            .send()
            .await?;

        self.handle_text_response(response).await
    }
}
