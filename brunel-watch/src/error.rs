//! Error types for polling sessions

use std::time::Duration;

use brunel_client::ClientError;
use thiserror::Error;

/// A failed fetch cycle within a polling session.
///
/// These are reported to the consumer on the session's event channel and do
/// not end the session; the next tick retries.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The progress fetch failed (transport error, bad status or undecodable body)
    #[error("progress fetch failed: {0}")]
    Fetch(#[from] ClientError),

    /// The progress fetch did not complete within the configured timeout
    #[error("progress fetch timed out after {0:?}")]
    Timeout(Duration),
}
