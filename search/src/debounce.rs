//! "Latest query wins" gate for input events.

use std::time::{Duration, Instant};

/// Holds the most recent input until it has been quiet for `delay`.
///
/// Every `submit` replaces the pending value and restarts the delay, so a
/// burst of keystrokes yields one search for the final text. Time is passed
/// in by the caller; nothing here sleeps or spawns.
#[derive(Debug)]
pub struct LatestWins<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    submitted_at: Instant,
}

impl<T> LatestWins<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Queues `value`, dropping whatever was pending.
    pub fn submit(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            submitted_at: now,
        });
    }

    /// Returns the pending value once the delay has passed since the last submit.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .deadline()
            .is_some_and(|deadline| now >= deadline);
        if !ready {
            return None;
        }
        self.pending.take().map(|pending| pending.value)
    }

    /// When the pending value becomes ready.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .map(|pending| pending.submitted_at + self.delay)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value regardless of the delay.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_nothing_pending_initially() {
        let mut gate: LatestWins<&str> = LatestWins::new(DELAY);
        assert!(!gate.is_pending());
        assert_eq!(gate.poll(Instant::now()), None);
    }

    #[test]
    fn test_value_released_after_delay() {
        let start = Instant::now();
        let mut gate = LatestWins::new(DELAY);

        gate.submit("e0", start);

        assert_eq!(gate.poll(start + Duration::from_millis(299)), None);
        assert_eq!(gate.poll(start + DELAY), Some("e0"));
        assert!(!gate.is_pending());
        assert_eq!(gate.poll(start + DELAY * 2), None);
    }

    #[test]
    fn test_latest_submit_wins_and_restarts_delay() {
        let start = Instant::now();
        let mut gate = LatestWins::new(DELAY);

        gate.submit("e", start);
        gate.submit("e0", start + Duration::from_millis(200));
        gate.submit("e01", start + Duration::from_millis(400));

        assert_eq!(gate.poll(start + Duration::from_millis(650)), None);
        assert_eq!(gate.deadline(), Some(start + Duration::from_millis(700)));
        assert_eq!(gate.poll(start + Duration::from_millis(700)), Some("e01"));
    }

    #[test]
    fn test_take_ignores_delay() {
        let start = Instant::now();
        let mut gate = LatestWins::new(DELAY);

        gate.submit(1, start);
        assert_eq!(gate.take(), Some(1));
        assert!(!gate.is_pending());
        assert_eq!(gate.poll(start + DELAY), None);
    }
}
