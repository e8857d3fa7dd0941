//! Single-shot advance timer.
//!
//! At most one timer is pending. Arming replaces (cancels) whatever was
//! pending, and a timer only fires for the cursor it was armed for: if the
//! cursor moved on before the deadline, the timer is discarded as stale.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::clock::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAdvance {
    cursor: usize,
    deadline: Instant,
}

/// A timer that fired for the scene it was armed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub cursor: usize,
}

#[derive(Debug)]
pub struct Scheduler<C: Clock> {
    clock: C,
    pending: Option<PendingAdvance>,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        Scheduler {
            clock,
            pending: None,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Arm a timer for `cursor`, replacing any pending one.
    pub fn arm(&mut self, cursor: usize, duration: Duration) {
        if let Some(stale) = self.pending.take() {
            debug!(cursor = stale.cursor, "advance timer cancelled");
        }
        let deadline = self.clock.now() + duration;
        debug!(cursor, duration_ms = duration.as_millis() as u64, "advance timer armed");
        self.pending = Some(PendingAdvance { cursor, deadline });
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(cursor = pending.cursor, "advance timer cancelled");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Cursor the pending timer belongs to, if any.
    pub fn armed_for(&self) -> Option<usize> {
        self.pending.map(|p| p.cursor)
    }

    /// Time left before the pending timer is due, or `None` when idle.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending
            .map(|p| p.deadline.saturating_duration_since(self.clock.now()))
    }

    /// Fire the pending timer if it is due. The timer is consumed either way
    /// once due; it only reports `Fired` if it still belongs to `current`.
    pub fn poll(&mut self, current: usize) -> Option<Fired> {
        let pending = self.pending?;
        if self.clock.now() < pending.deadline {
            return None;
        }
        self.pending = None;
        if pending.cursor != current {
            debug!(
                armed_for = pending.cursor,
                current, "stale advance timer discarded"
            );
            return None;
        }
        trace!(cursor = current, "advance timer fired");
        Some(Fired { cursor: current })
    }
}

impl<C: Clock> Drop for Scheduler<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::clock::ManualClock;

    #[test]
    fn fires_at_deadline_once() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new(&clock);
        scheduler.arm(0, Duration::from_millis(100));

        clock.advance_ms(99);
        assert_eq!(scheduler.poll(0), None);
        clock.advance_ms(1);
        assert_eq!(scheduler.poll(0), Some(Fired { cursor: 0 }));
        assert_eq!(scheduler.poll(0), None);
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn rearming_replaces_pending_timer() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new(&clock);
        scheduler.arm(0, Duration::from_millis(100));
        scheduler.arm(1, Duration::from_millis(500));

        clock.advance_ms(100);
        assert_eq!(scheduler.poll(1), None);
        assert_eq!(scheduler.armed_for(), Some(1));
        clock.advance_ms(400);
        assert_eq!(scheduler.poll(1), Some(Fired { cursor: 1 }));
    }

    #[test]
    fn stale_timer_is_discarded() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new(&clock);
        scheduler.arm(2, Duration::from_millis(10));
        clock.advance_ms(10);
        assert_eq!(scheduler.poll(3), None);
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn cancel_clears_pending() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new(&clock);
        scheduler.arm(0, Duration::from_millis(10));
        scheduler.cancel();
        clock.advance_ms(10);
        assert_eq!(scheduler.poll(0), None);
        assert_eq!(scheduler.remaining(), None);
    }

    #[test]
    fn remaining_counts_down() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new(&clock);
        scheduler.arm(0, Duration::from_millis(300));
        clock.advance_ms(120);
        assert_eq!(scheduler.remaining(), Some(Duration::from_millis(180)));
        clock.advance_ms(500);
        assert_eq!(scheduler.remaining(), Some(Duration::ZERO));
    }
}
