//! Task status polling.
//!
//! The loop is poll-after-sleep, not sleep-after-poll: every iteration
//! sleeps one interval before the status check, including the first, so a
//! freshly submitted job is never polled in a tight loop right after
//! submission. The first status fetch therefore happens no sooner than one
//! interval after entry.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::types::Task;
use crate::{Error, Result};

use super::GatewayClient;

/// Interval used when neither the caller nor the gateway supplies a hint.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Options for [`GatewayClient::wait_for_task`].
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Initial poll interval; superseded by gateway hints as they arrive.
    pub poll_interval: Option<Duration>,
    /// Overall deadline for observing a terminal status.
    pub max_wait: Duration,
}

impl WaitOptions {
    pub fn new(max_wait: Duration) -> Self {
        Self {
            poll_interval: None,
            max_wait,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }
}

impl GatewayClient {
    /// Poll `tasks/get` until the task reaches a terminal status.
    ///
    /// The interval is the most recent positive gateway `pollInterval`
    /// hint, falling back to the caller's hint and then to
    /// [`DEFAULT_POLL_INTERVAL`]. Fails with [`Error::Timeout`] as soon as
    /// one more sleep would cross the deadline; a non-terminal task is
    /// never returned, and a deadline shorter than one interval times out
    /// without a single status fetch.
    ///
    /// Loop state is local: concurrent waits on the same client are
    /// independent, and a wait is abandoned by dropping the future. No
    /// cancellation message is sent; the task keeps running server-side.
    /// Failed status fetches are not retried here.
    pub async fn wait_for_task(&self, task_id: &str, opts: WaitOptions) -> Result<Task> {
        let started = Instant::now();
        let mut interval = opts
            .poll_interval
            .filter(|d| !d.is_zero())
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        loop {
            let waited = started.elapsed();
            if waited + interval > opts.max_wait {
                return Err(Error::Timeout {
                    task_id: task_id.to_string(),
                    waited,
                });
            }

            tokio::time::sleep(interval).await;

            let task = self.fetch_status(task_id).await?;
            if task.is_terminal() {
                debug!(task_id, status = ?task.status, "task reached terminal status");
                return Ok(task);
            }

            if let Some(hint) = task.poll_interval_hint() {
                interval = hint;
            }
            debug!(task_id, status = ?task.status, interval_ms = interval.as_millis() as u64, "task still pending");
        }
    }
}
