use std::time::{Duration, Instant};

/// Fixed-interval tick source polled by the host loop.
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
    next: Instant,
}

impl FixedTicker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks due at `now`. Missed ticks are all reported, never dropped.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while self.next <= now {
            self.next += self.interval;
            due += 1;
        }
        due
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
