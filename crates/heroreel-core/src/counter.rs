//! Count-up animation for headline figures
//!
//! A counter runs once from zero to its target, shaped by an easing curve,
//! and is rendered with digit grouping ("12.500+").

use std::time::{Duration, Instant};

use crate::config::{EasingType, StatConfig};
use crate::easing::lerp;

/// One animated figure
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    duration: Duration,
    easing: EasingType,
    started: Option<Instant>,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration, easing: EasingType) -> Self {
        Self {
            target,
            duration,
            easing,
            started: None,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Start counting; later calls keep the first start time
    pub fn start(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Whether the counter has reached its target by `now`
    pub fn is_finished(&self, now: Instant) -> bool {
        match self.started {
            Some(started) => now.saturating_duration_since(started) >= self.duration,
            None => false,
        }
    }

    /// Displayed value at `now`; zero before `start`
    pub fn value_at(&self, now: Instant) -> u64 {
        let Some(started) = self.started else {
            return 0;
        };
        if self.is_finished(now) {
            return self.target;
        }

        let t = now.saturating_duration_since(started).as_secs_f64() / self.duration.as_secs_f64();
        let eased = self.easing.apply(t);
        (lerp(0.0, self.target as f64, eased).floor() as u64).min(self.target)
    }
}

/// Render `value` with `separator` between groups of three digits
pub fn format_grouped(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// A stat line paired with its counter
#[derive(Debug, Clone)]
pub struct StatCounter {
    pub label: String,
    pub suffix: String,
    pub counter: CountUp,
}

impl StatCounter {
    pub fn from_config(stat: &StatConfig, duration: Duration, easing: EasingType) -> Self {
        Self {
            label: stat.label.clone(),
            suffix: stat.suffix.clone(),
            counter: CountUp::new(stat.value, duration, easing),
        }
    }

    /// Formatted figure at `now` ("2.021", "350+")
    pub fn display(&self, now: Instant, separator: char) -> String {
        format!("{}{}", format_grouped(self.counter.value_at(now), separator), self.suffix)
    }
}
