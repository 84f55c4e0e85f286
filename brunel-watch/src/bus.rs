//! Event bus adapter
//!
//! The server pushes notifications over a multiplexed WebSocket channel.
//! The transport itself belongs to the caller; this adapter takes whatever
//! stream of decoded envelopes the caller has and turns matching events into
//! refresh nudges for a session, so a push notification causes an immediate
//! re-fetch instead of waiting for the next tick.

use tokio_stream::{Stream, StreamExt};
use tracing::debug;

use brunel_core::domain::event::EventEnvelope;

use crate::session::RefreshHandle;

/// Forwards every bus event of `event_type` to the session as a refresh
/// nudge. Runs until the event stream ends.
pub async fn forward_refresh<E>(events: E, event_type: &str, handle: RefreshHandle)
where
    E: Stream<Item = EventEnvelope> + Unpin,
{
    let mut events = events;
    while let Some(event) = events.next().await {
        if event.event_type == event_type {
            debug!(event_type, "bus event received, requesting refresh");
            handle.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use brunel_client::ClientError;
    use brunel_core::domain::event::EVENT_JOB_CREATED;
    use brunel_core::domain::progress::JobProgress;
    use brunel_core::domain::state::JobState;

    use crate::clock::Clock;
    use crate::config::WatchConfig;
    use crate::session::{JobWatcher, WatchEvent};
    use crate::source::ProgressSource;

    struct FrozenClock(AtomicU64);

    impl Clock for FrozenClock {
        fn now_millis(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    struct CountingSource {
        calls: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl ProgressSource for CountingSource {
        async fn fetch_progress(
            &self,
            _job_id: &str,
            since_millis: u64,
        ) -> Result<JobProgress, ClientError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(since_millis);
            let state = if calls.len() < 2 {
                JobState::Processing
            } else {
                JobState::Success
            };
            Ok(JobProgress {
                state,
                stages: Vec::new(),
            })
        }
    }

    fn envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope {
            event_type: event_type.to_string(),
            data: Default::default(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_matching_events_trigger_refresh() {
        let source = Arc::new(CountingSource {
            calls: Mutex::new(Vec::new()),
        });
        let config = WatchConfig::new(Duration::from_secs(3600));
        let clock = Arc::new(FrozenClock(AtomicU64::new(1_000_000)));
        let watcher = JobWatcher::with_clock(Arc::clone(&source), config, clock);

        let started = tokio::time::Instant::now();
        let mut session = watcher.watch("j1");
        assert!(matches!(
            session.next_event().await,
            Some(WatchEvent::Progress(_))
        ));

        // One unrelated event, one that matters.
        let bus = tokio_stream::iter(vec![envelope("RepositoryUpdated"), envelope(EVENT_JOB_CREATED)]);
        forward_refresh(bus, EVENT_JOB_CREATED, session.refresh_handle()).await;

        assert!(matches!(
            session.next_event().await,
            Some(WatchEvent::Progress(_))
        ));
        assert!(session.next_event().await.is_none());

        // The second fetch came from the nudge; a timer-driven fetch would
        // have advanced the paused clock by an hour.
        assert!(started.elapsed() < Duration::from_secs(3600));
        assert_eq!(source.calls.lock().unwrap().len(), 2);
    }
}
