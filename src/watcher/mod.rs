//! Poll loop
//!
//! The [`Watcher`] owns the poll cursor and the two de-duplication slots and
//! drives one cycle at a time:
//!
//! ```text
//! fetch(cursor) ─▶ advance cursor ─▶ check_response ─▶ parse_status(first)
//!       │                                  │                  │
//!       └──────────── any error ───────────┴──────────────────┘
//!                          │                                  │
//!                 notify if new error              notify if new status
//!                          └───────────────┬──────────────────┘
//!                                          ▼
//!                                  sleep(poll_interval)
//! ```
//!
//! Every cycle ends with the sleep, whatever happened inside it, including a
//! panic in the cycle body.

mod dedup;

pub use dedup::DedupSlot;

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use crate::api::{check_response, current_date, PracticumClient};
use crate::config::Config;
use crate::error::Result;
use crate::notifications::{Notifier, TelegramChannel};
use crate::parser::parse_status;
use crate::utils::unix_now;

/// What a single poll cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was sent
    StatusSent(String),
    /// The status message equals the last one sent
    StatusUnchanged,
    /// The response held no homework entries
    NoUpdates,
    /// The cycle failed; `notified` tells whether the error was sent
    Failed { error: String, notified: bool },
}

/// Homework status watcher
pub struct Watcher {
    client: PracticumClient,
    notifier: Notifier,
    poll_interval: Duration,
    cursor: i64,
    last_status: DedupSlot,
    last_error: DedupSlot,
}

impl Watcher {
    /// Create a watcher whose cursor starts at the current time
    pub fn new(client: PracticumClient, notifier: Notifier, poll_interval: Duration) -> Self {
        Self {
            client,
            notifier,
            poll_interval,
            cursor: unix_now(),
            last_status: DedupSlot::new(),
            last_error: DedupSlot::new(),
        }
    }

    /// Build a watcher talking to the configured API and Telegram chat
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is incomplete, or the
    /// client/channel error if an HTTP client cannot be built.
    ///
    /// [`Error::Config`]: crate::error::Error::Config
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let client = PracticumClient::from_config(config)?;
        let channel = TelegramChannel::from_config(config)?;

        Ok(Self::new(
            client,
            Notifier::new(Box::new(channel)),
            config.poll_interval(),
        ))
    }

    /// Start from a specific cursor instead of the current time
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Current poll cursor
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Delay between cycles
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Last status message sent
    pub fn last_status_message(&self) -> Option<&str> {
        self.last_status.last()
    }

    /// Last error message sent
    pub fn last_error_message(&self) -> Option<&str> {
        self.last_error.last()
    }

    /// Send a status message unless it repeats the previous one
    ///
    /// Returns whether a send was attempted.
    pub async fn notify_status(&mut self, message: &str) -> bool {
        Self::notify_if_changed(&self.notifier, &mut self.last_status, message).await
    }

    /// Send an error message unless it repeats the previous one
    ///
    /// Returns whether a send was attempted.
    pub async fn notify_error(&mut self, message: &str) -> bool {
        Self::notify_if_changed(&self.notifier, &mut self.last_error, message).await
    }

    async fn notify_if_changed(notifier: &Notifier, slot: &mut DedupSlot, message: &str) -> bool {
        if !slot.is_new(message) {
            tracing::debug!("Skipping repeated message: {message}");
            return false;
        }

        let delivery = notifier.notify(message).await;
        tracing::debug!(success = delivery.success, "Delivery finished: {delivery}");
        slot.record(message);
        true
    }

    /// Fetch, validate and format; yields the status message, if any
    async fn poll(&mut self) -> Result<Option<String>> {
        let response = self.client.fetch(self.cursor).await?;

        match current_date(&response) {
            Some(timestamp) => self.cursor = timestamp,
            None => tracing::warn!(
                cursor = self.cursor,
                "Response has no current_date, keeping previous cursor"
            ),
        }

        let homeworks = check_response(&response)?;
        match homeworks.first() {
            Some(latest) => Ok(Some(parse_status(latest)?)),
            None => Ok(None),
        }
    }

    /// Run one poll cycle without sleeping
    pub async fn tick(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(Some(message)) => {
                if self.notify_status(&message).await {
                    CycleOutcome::StatusSent(message)
                } else {
                    CycleOutcome::StatusUnchanged
                }
            }
            Ok(None) => {
                tracing::debug!(cursor = self.cursor, "No new homework statuses");
                CycleOutcome::NoUpdates
            }
            Err(e) => {
                tracing::error!(category = %e.category(), "Poll cycle failed: {e}");
                let error = e.to_string();
                let notified = self.notify_error(&error).await;
                CycleOutcome::Failed { error, notified }
            }
        }
    }

    /// Run one cycle, containing any panic raised inside it
    async fn guarded_tick(&mut self) {
        if let Err(panic) = AssertUnwindSafe(self.tick()).catch_unwind().await {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!("Poll cycle panicked: {reason}");
        }
    }

    /// Poll forever, stopping only on Ctrl-C
    pub async fn run(self) {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await;
    }

    /// Poll until `shutdown` resolves
    ///
    /// The sleep after each cycle is unconditional; `shutdown` may interrupt
    /// either the cycle or the sleep.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            interval_secs = self.poll_interval.as_secs(),
            cursor = self.cursor,
            "Homework watcher started"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = self.guarded_tick() => {}
                _ = &mut shutdown => break,
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = &mut shutdown => break,
            }
        }

        tracing::info!("Homework watcher stopped");
    }
}
