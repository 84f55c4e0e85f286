//! Brunel Watch
//!
//! Polling sessions over the Brunel progress API.
//!
//! A session drives the cycle tick -> delta fetch -> merge -> emit until the
//! job reaches a terminal state or the consumer cancels. Cycles run strictly
//! one at a time: the next tick is armed only after the current fetch and
//! merge have settled, so no two fetches for one session are ever in flight
//! together and snapshots reach the consumer in tick order.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use brunel_client::BrunelClient;
//! use brunel_watch::{JobWatcher, WatchConfig, WatchEvent};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(BrunelClient::new("http://localhost:8080"));
//!     let watcher = JobWatcher::new(client, WatchConfig::default());
//!
//!     let mut session = watcher.watch("5d1db4e3");
//!     while let Some(event) = session.next_event().await {
//!         match event {
//!             WatchEvent::Progress(progress) => println!("state: {}", progress.state),
//!             WatchEvent::Error(err) => eprintln!("fetch failed: {err}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod clock;
mod config;
mod error;
mod session;
mod source;

pub use bus::forward_refresh;
pub use clock::{Clock, SystemClock};
pub use config::WatchConfig;
pub use error::WatchError;
pub use session::{JobWatcher, RefreshHandle, WatchEvent, WatchSession};
pub use source::ProgressSource;
