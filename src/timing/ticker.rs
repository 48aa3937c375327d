// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Periodic round ticker.
//!
//! This module provides a tokio task that sends a message on a fixed period
//! while a round is running. The owner starts it when a round begins and
//! stops it when the round ends.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Default period between ticks
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Starts and stops a periodic tick task
#[derive(Debug)]
pub struct Ticker {
    /// Time between ticks
    period: Duration,
    /// Running tick task
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Create a stopped ticker
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            handle: None,
        }
    }

    /// Get the tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Check if the tick task is running
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start sending `message` every period, the first one period from now
    ///
    /// Does nothing if already running. The task ends on its own once the
    /// receiver is dropped. Must be called from within a tokio runtime.
    pub fn start<T>(&mut self, tx: UnboundedSender<T>, message: T)
    where
        T: Clone + Send + 'static,
    {
        if self.is_running() {
            return;
        }

        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(message.clone()).is_err() {
                    break;
                }
            }
        }));
        debug!(period_ms = period.as_millis() as u64, "ticker started");
    }

    /// Stop the tick task
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("ticker stopped");
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new(Duration::from_secs(1));

        let started = Instant::now();
        ticker.start(tx, 1u8);
        assert!(ticker.is_running());

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(started.elapsed(), Duration::from_secs(1));
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::default();

        ticker.start(tx, ());
        assert_eq!(rx.recv().await, Some(()));

        ticker.stop();
        assert!(!ticker.is_running());
        let next = time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(!matches!(next, Ok(Some(()))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_idempotent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new(Duration::from_millis(500));

        ticker.start(tx.clone(), 'a');
        ticker.start(tx, 'b');

        assert_eq!(rx.recv().await, Some('a'));
        assert_eq!(rx.recv().await, Some('a'));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new(Duration::from_secs(1));

        ticker.start(tx.clone(), 1u32);
        ticker.stop();
        ticker.start(tx, 2u32);

        assert_eq!(rx.recv().await, Some(2));
    }

    #[test]
    fn test_stopped_by_default() {
        let ticker = Ticker::default();
        assert!(!ticker.is_running());
        assert_eq!(ticker.period(), Duration::from_secs(1));
    }
}
