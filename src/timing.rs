//! # Periodic Scheduling
//!
//! A small timer abstraction shared by the periodic tasks: a configurable
//! period plus a shutdown signal, instead of bare sleeps scattered through
//! the loops. Under tokio's paused test clock the ticks are fully
//! deterministic, which is what the control-loop tests rely on.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// A cancellable periodic timer.
///
/// `tick` resolves once per period until the shutdown signal fires (or
/// its sender is dropped), after which it resolves `false` immediately.
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
    shutdown: watch::Receiver<bool>,
}

impl Ticker {
    /// Create a ticker with the given period.
    ///
    /// Missed ticks are delayed rather than bursted; under scheduler
    /// jitter the cadence is a soft guarantee only.
    #[must_use]
    pub fn new(period: Duration, shutdown: watch::Receiver<bool>) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, shutdown }
    }

    /// Wait for the next tick.
    ///
    /// Returns `true` on a tick, `false` once shutdown has been
    /// signalled. The first call resolves immediately, matching
    /// `tokio::time::interval`.
    pub async fn tick(&mut self) -> bool {
        loop {
            if *self.shutdown.borrow() {
                return false;
            }

            tokio::select! {
                _ = self.interval.tick() => return true,
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        return false;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_period() {
        let (_tx, rx) = watch::channel(false);
        let mut ticker = Ticker::new(Duration::from_millis(20), rx);

        let start = Instant::now();
        for _ in 0..5 {
            assert!(ticker.tick().await);
        }

        // First tick is immediate, the remaining four are spaced 20ms.
        assert_eq!(start.elapsed(), Duration::from_millis(80));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_ticker() {
        let (tx, rx) = watch::channel(false);
        let mut ticker = Ticker::new(Duration::from_millis(10), rx);

        assert!(ticker.tick().await);
        tx.send(true).unwrap();
        assert!(!ticker.tick().await);
        assert!(!ticker.tick().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sender_stops_ticker() {
        let (tx, rx) = watch::channel(false);
        let mut ticker = Ticker::new(Duration::from_millis(10), rx);

        assert!(ticker.tick().await);
        drop(tx);
        assert!(!ticker.tick().await);
    }
}
