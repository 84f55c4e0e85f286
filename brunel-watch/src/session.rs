//! Polling sessions
//!
//! [`JobWatcher::watch`] spawns one background task per watched job. The
//! task fetches a progress snapshot immediately and then once per poll
//! interval, merges each snapshot into the accumulated view and emits the
//! result to the consumer. The session completes on its own once the job
//! reaches a terminal state, or when the consumer drops the session handle.
//!
//! Fetch cycles are strictly sequential: the next tick is armed only after
//! the current fetch, merge and emit have settled, so results can never
//! reach the consumer out of tick order.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_stream::Stream;
use tracing::{Instrument, debug, warn};
use uuid::Uuid;

use brunel_core::domain::progress::JobProgress;
use brunel_core::merge::merge;
use brunel_core::policy::should_continue;

use crate::clock::{Clock, SystemClock};
use crate::config::WatchConfig;
use crate::error::WatchError;
use crate::source::ProgressSource;

/// What a polling session emits to its consumer.
#[derive(Debug)]
pub enum WatchEvent {
    /// Merged snapshot after a successful fetch cycle.
    Progress(JobProgress),
    /// A fetch cycle failed; the session keeps polling.
    Error(WatchError),
}

/// Starts polling sessions against a progress source.
///
/// Sessions started from one watcher are fully independent: each gets its
/// own timer and its own accumulated state.
pub struct JobWatcher<S: ?Sized> {
    source: Arc<S>,
    config: WatchConfig,
    clock: Arc<dyn Clock>,
}

impl<S> JobWatcher<S>
where
    S: ProgressSource + 'static,
{
    /// Creates a watcher using the system wall clock for windowing
    pub fn new(source: Arc<S>, config: WatchConfig) -> Self {
        Self::with_clock(source, config, Arc::new(SystemClock))
    }

    /// Creates a watcher with an explicit clock
    ///
    /// Used by tests to make delta-fetch windows deterministic.
    pub fn with_clock(source: Arc<S>, config: WatchConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            config,
            clock,
        }
    }

    /// Starts a polling session for one job
    ///
    /// The returned session owns the background task; dropping it cancels
    /// the session and suppresses any cycle still in flight.
    pub fn watch(&self, job_id: impl Into<String>) -> WatchSession {
        let job_id = job_id.into();
        let (events_tx, events_rx) = mpsc::channel(64);
        let (refresh_tx, refresh_rx) = mpsc::channel(8);

        let span = tracing::info_span!("watch", job = %job_id, session = %Uuid::new_v4());
        let task = tokio::spawn(
            run_session(
                Arc::clone(&self.source),
                self.config.clone(),
                Arc::clone(&self.clock),
                job_id,
                events_tx,
                refresh_rx,
            )
            .instrument(span),
        );

        WatchSession {
            events: events_rx,
            refresh: RefreshHandle { nudges: refresh_tx },
            task,
        }
    }
}

/// A running polling session for one job.
///
/// Consume it with [`WatchSession::next_event`] or as a
/// [`tokio_stream::Stream`]. The stream ends when the job reaches a
/// terminal state.
pub struct WatchSession {
    events: mpsc::Receiver<WatchEvent>,
    refresh: RefreshHandle,
    task: JoinHandle<()>,
}

impl WatchSession {
    /// Waits for the next event; `None` once the session has completed.
    pub async fn next_event(&mut self) -> Option<WatchEvent> {
        self.events.recv().await
    }

    /// A handle for requesting out-of-band fetches, e.g. from a bus event.
    pub fn refresh_handle(&self) -> RefreshHandle {
        self.refresh.clone()
    }

    /// Cancels the session immediately.
    ///
    /// Dropping the session has the same effect.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl Stream for WatchSession {
    type Item = WatchEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}

/// Requests an immediate out-of-band fetch from a session.
///
/// The periodic timer is not reset; the nudge is an extra fetch layered on
/// top of the normal cadence. Nudges arriving while the session is mid-cycle
/// are queued, and excess nudges beyond the queue are dropped since one
/// pending fetch already covers them.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    nudges: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Asks the session to fetch now instead of waiting for the next tick.
    pub fn refresh(&self) {
        let _ = self.nudges.try_send(());
    }
}

async fn run_session<S>(
    source: Arc<S>,
    config: WatchConfig,
    clock: Arc<dyn Clock>,
    job_id: String,
    events: mpsc::Sender<WatchEvent>,
    mut refresh: mpsc::Receiver<()>,
) where
    S: ProgressSource + ?Sized,
{
    let interval_millis = config.poll_interval.as_millis() as u64;
    let mut ticker = time::interval(config.poll_interval);
    // A slow cycle must delay the following tick, not cause a burst of
    // catch-up fetches.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut accumulated = JobProgress::empty();
    let mut first_fetch = true;
    let mut first_emission = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            Some(()) = refresh.recv() => {
                debug!("refresh requested, fetching out of band");
            }
        }

        // The window is anchored to the moment this cycle starts, not to
        // the response arrival, so a slow fetch cannot widen the gap to the
        // next window beyond one interval. Overlap is fine: the first fetch
        // covers all history and later windows only need to reach back one
        // interval.
        let since = if first_fetch {
            0
        } else {
            clock.now_millis().saturating_sub(interval_millis)
        };
        first_fetch = false;

        let outcome = time::timeout(config.fetch_timeout, source.fetch_progress(&job_id, since)).await;

        let event = match outcome {
            Ok(Ok(snapshot)) => {
                accumulated = merge(&accumulated, &snapshot);
                WatchEvent::Progress(accumulated.clone())
            }
            Ok(Err(err)) => {
                warn!(error = %err, "progress fetch failed");
                WatchEvent::Error(err.into())
            }
            Err(_) => {
                warn!(timeout = ?config.fetch_timeout, "progress fetch timed out");
                WatchEvent::Error(WatchError::Timeout(config.fetch_timeout))
            }
        };

        let emitted_snapshot = matches!(event, WatchEvent::Progress(_));
        if events.send(event).await.is_err() {
            // Consumer went away.
            return;
        }

        if emitted_snapshot {
            if !should_continue(&accumulated, first_emission) {
                debug!(state = %accumulated.state, "job reached a terminal state, session complete");
                return;
            }
            first_emission = false;
        }
    }
}
