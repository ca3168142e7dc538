use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Outcome of a liveness tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    /// The peer is still within its grace window; ping it again.
    Ping,
    /// Nothing heard for more than two periods; the peer is gone.
    Expired,
}

/// Per-peer liveness timer.
///
/// The first tick completes immediately, later ticks every `period`. Only one
/// deadline is ever pending: dropping the heartbeat cancels it, and a tick
/// that was not awaited never fires late.
#[derive(Debug)]
pub struct Heartbeat {
    period: Duration,
    interval: Interval,
}

impl Heartbeat {
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { period, interval }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    pub fn check(&self, last_beat: Instant, now: Instant) -> Pulse {
        if now.saturating_duration_since(last_beat) > self.period.saturating_mul(2) {
            Pulse::Expired
        } else {
            Pulse::Ping
        }
    }
}
