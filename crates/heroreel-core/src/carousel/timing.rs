//! Deadline-based timers
//!
//! Timers never sleep themselves. They record when they are due and the
//! owner decides when to check, which keeps the engine deterministic under
//! any clock.

use std::time::{Duration, Instant};

/// Repeating timer with a fixed period
///
/// At most one deadline is armed at any time: `start` replaces whatever was
/// armed before.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Option<Instant>,
}

impl Interval {
    /// Create a stopped interval. A zero period can never be armed.
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arm the timer so the first tick lands one full period after `now`
    pub fn start(&mut self, now: Instant) {
        self.next = if self.period.is_zero() {
            None
        } else {
            Some(now + self.period)
        };
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Next tick instant, if armed
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Consume the pending tick if it is due at or before `now`
    ///
    /// Returns the scheduled instant of the tick and re-arms one period
    /// later, so late checks never shift the cadence.
    pub fn fire(&mut self, now: Instant) -> Option<Instant> {
        let due = self.next.filter(|at| *at <= now)?;
        self.next = Some(due + self.period);
        Some(due)
    }
}

/// Fraction of `duration` elapsed between `start` and `now`, clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}
