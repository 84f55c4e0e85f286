//! Watch configuration
//!
//! Defines the tunable parameters of a polling session: poll cadence and
//! fetch timeout.

use std::time::Duration;

/// Configuration for polling sessions
///
/// Both intervals are configurable to allow tuning for different
/// deployments (fast local server vs slow remote one).
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// How often to fetch a progress snapshot
    pub poll_interval: Duration,

    /// How long a single fetch may take before it is treated as failed.
    /// Defaults to one poll interval.
    pub fetch_timeout: Duration,
}

impl WatchConfig {
    /// Creates a configuration with the given poll interval and a fetch
    /// timeout of one interval
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            fetch_timeout: poll_interval,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - BRUNEL_POLL_INTERVAL_MS (optional, default: 2000)
    /// - BRUNEL_FETCH_TIMEOUT_MS (optional, default: poll interval)
    pub fn from_env() -> anyhow::Result<Self> {
        let poll_interval = std::env::var("BRUNEL_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(2000));

        let fetch_timeout = std::env::var("BRUNEL_FETCH_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(poll_interval);

        let config = Self {
            poll_interval,
            fetch_timeout,
        };
        config.validate()?;

        Ok(config)
    }

    /// Overrides the fetch timeout
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.fetch_timeout.is_zero() {
            anyhow::bail!("fetch_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}
