//! Carousel state machine
//!
//! The engine owns the active index, the slide and indicator marks, the
//! autoplay timer and the transition lock. It has no clock of its own: every
//! operation receives the current instant and first runs whatever timers
//! fell due before it, in order. Hosts call [`Carousel::advance`] when
//! [`Carousel::next_deadline`] passes.

use std::time::{Duration, Instant};

use tracing::debug;

use super::index::{normalize, offset};
use super::timing::{progress, Interval};

/// What caused a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Activation of the first slide during `init`
    Init,
    /// Autoplay tick
    Autoplay,
    /// Explicit command (`go_to`, `move_by`, `jump`)
    Manual,
}

impl Origin {
    /// Whether a request of this origin may start while a lock taken by `held` is active
    ///
    /// Manual requests override locks taken by the system; a manual lock
    /// holds against everything.
    #[inline]
    fn preempts(self, held: Origin) -> bool {
        self == Origin::Manual && held != Origin::Manual
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Init => "init",
            Origin::Autoplay => "autoplay",
            Origin::Manual => "manual",
        }
    }
}

/// An accepted index change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub origin: Origin,
    /// When the transition happened (a tick reports its scheduled instant)
    pub at: Instant,
}

/// Construction parameters for [`Carousel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselOptions {
    /// Number of slides; zero produces an inert carousel
    pub slide_count: usize,
    /// Number of indicator dots, if any
    pub indicator_count: Option<usize>,
    /// Autoplay period; zero disables autoplay
    pub interval: Duration,
    /// Minimum time between accepted transitions
    pub transition_lock: Duration,
}

impl CarouselOptions {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);
    pub const DEFAULT_TRANSITION_LOCK: Duration = Duration::from_millis(1000);

    /// Options for `slide_count` slides without indicators and default timing
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count,
            indicator_count: None,
            interval: Self::DEFAULT_INTERVAL,
            transition_lock: Self::DEFAULT_TRANSITION_LOCK,
        }
    }

    pub fn with_indicators(mut self, count: usize) -> Self {
        self.indicator_count = Some(count);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_transition_lock(mut self, lock: Duration) -> Self {
        self.transition_lock = lock;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct TransitionLock {
    release_at: Instant,
    origin: Origin,
}

/// Hero carousel engine
#[derive(Debug, Clone)]
pub struct Carousel {
    options: CarouselOptions,
    current: usize,
    /// Active flag per slide
    slides: Vec<bool>,
    /// Active flag per indicator dot
    indicators: Option<Vec<bool>>,
    autoplay: Interval,
    lock: Option<TransitionLock>,
    /// Start of the current progress-bar run
    progress_since: Option<Instant>,
    /// Accepted transitions not yet collected by the host
    transitions: Vec<Transition>,
    disposed: bool,
}

impl Carousel {
    /// Create a carousel, activate slide 0 and start autoplay
    pub fn init(options: CarouselOptions, now: Instant) -> Self {
        let mut carousel = Self {
            options,
            current: 0,
            slides: vec![false; options.slide_count],
            indicators: options.indicator_count.map(|n| vec![false; n]),
            autoplay: Interval::new(options.interval),
            lock: None,
            progress_since: None,
            transitions: Vec::new(),
            disposed: false,
        };

        if carousel.is_inert() {
            debug!("No slides, carousel stays inert");
            return carousel;
        }

        carousel.transition(0, Origin::Init, now);
        carousel.autoplay.start(now);
        carousel
    }

    /// Options this carousel was built with
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// A carousel without slides ignores every call
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.slides.is_empty()
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[inline]
    fn is_live(&self) -> bool {
        !self.is_inert() && !self.disposed
    }

    /// Number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the active slide, `None` when inert
    pub fn current(&self) -> Option<usize> {
        (!self.is_inert()).then_some(self.current)
    }

    /// Whether the transition lock is held
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.lock.is_some()
    }

    /// Whether the autoplay timer is armed
    #[inline]
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_armed()
    }

    /// Active flag per slide
    pub fn slide_marks(&self) -> &[bool] {
        &self.slides
    }

    /// Active flag per indicator, `None` when the carousel has no indicators
    pub fn indicator_marks(&self) -> Option<&[bool]> {
        self.indicators.as_deref()
    }

    /// Take the transitions accepted since the last call
    pub fn take_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transitions)
    }

    /// Earliest pending timer (lock release or autoplay tick)
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.is_live() {
            return None;
        }
        let release = self.lock.map(|lock| lock.release_at);
        match (release, self.autoplay.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fraction of the autoplay period elapsed since the last transition
    pub fn progress(&self, now: Instant) -> f64 {
        match self.progress_since {
            Some(since) if !self.options.interval.is_zero() => {
                progress(since, now, self.options.interval)
            }
            _ => 0.0,
        }
    }

    /// Run every timer that fell due at or before `now`
    pub fn advance(&mut self, now: Instant) {
        if self.is_live() {
            self.settle(now);
        }
    }

    /// Activate the slide at `target` (floored modulo). Dropped while locked.
    ///
    /// Returns whether the transition was accepted.
    pub fn go_to(&mut self, target: i64, now: Instant) -> bool {
        if !self.is_live() {
            return false;
        }
        self.settle(now);
        self.transition(target, Origin::Manual, now)
    }

    /// Move `delta` slides from the current one and restart the autoplay period
    pub fn move_by(&mut self, delta: i64, now: Instant) -> bool {
        if !self.is_live() {
            return false;
        }
        self.settle(now);
        self.autoplay.cancel();
        let target = offset(self.current, delta, self.len()) as i64;
        let accepted = self.transition(target, Origin::Manual, now);
        self.autoplay.start(now);
        accepted
    }

    /// Jump to `target` and restart the autoplay period
    pub fn jump(&mut self, target: i64, now: Instant) -> bool {
        if !self.is_live() {
            return false;
        }
        self.settle(now);
        self.autoplay.cancel();
        let accepted = self.transition(target, Origin::Manual, now);
        self.autoplay.start(now);
        accepted
    }

    /// Stop autoplay without touching the active slide
    pub fn pause(&mut self, now: Instant) {
        if !self.is_live() {
            return;
        }
        self.settle(now);
        self.autoplay.cancel();
    }

    /// Restart autoplay with a full period
    pub fn resume(&mut self, now: Instant) {
        if !self.is_live() {
            return;
        }
        self.settle(now);
        self.autoplay.cancel();
        self.autoplay.start(now);
    }

    /// Cancel every timer; later calls are no-ops. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.autoplay.cancel();
        self.lock = None;
        self.disposed = true;
        debug!("Carousel disposed");
    }

    fn settle(&mut self, now: Instant) {
        loop {
            let release = self
                .lock
                .map(|lock| lock.release_at)
                .filter(|at| *at <= now);
            let tick = self.autoplay.deadline().filter(|at| *at <= now);

            match (release, tick) {
                // a release scheduled no later than the tick runs first
                (Some(release), Some(tick)) if release <= tick => self.lock = None,
                (Some(_), None) => self.lock = None,
                (_, Some(_)) => {
                    if let Some(at) = self.autoplay.fire(now) {
                        debug!("Autoplay tick");
                        let target = offset(self.current, 1, self.len()) as i64;
                        self.transition(target, Origin::Autoplay, at);
                    }
                }
                (None, None) => break,
            }
        }
    }

    fn transition(&mut self, target: i64, origin: Origin, at: Instant) -> bool {
        if let Some(lock) = self.lock {
            if !origin.preempts(lock.origin) {
                debug!(
                    "Dropped {} transition to {}: locked by {} transition",
                    origin.as_str(),
                    target,
                    lock.origin.as_str()
                );
                return false;
            }
        }

        let from = self.current;
        let to = normalize(target, self.len());

        self.slides[from] = false;
        if let Some(mark) = self.indicators.as_mut().and_then(|marks| marks.get_mut(from)) {
            *mark = false;
        }

        self.current = to;

        self.slides[to] = true;
        if let Some(mark) = self.indicators.as_mut().and_then(|marks| marks.get_mut(to)) {
            *mark = true;
        }

        self.progress_since = Some(at);
        self.lock = (!self.options.transition_lock.is_zero()).then(|| TransitionLock {
            release_at: at + self.options.transition_lock,
            origin,
        });
        self.transitions.push(Transition { from, to, origin, at });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clock(Instant);

    impl Clock {
        fn new() -> Self {
            Self(Instant::now())
        }

        fn at(&self, ms: u64) -> Instant {
            self.0 + Duration::from_millis(ms)
        }
    }

    fn three_slides(clock: &Clock) -> Carousel {
        Carousel::init(CarouselOptions::new(3).with_indicators(3), clock.at(0))
    }

    fn active_count(marks: &[bool]) -> usize {
        marks.iter().filter(|m| **m).count()
    }

    fn assert_single_active(carousel: &Carousel) {
        let current = carousel.current().unwrap();
        assert_eq!(active_count(carousel.slide_marks()), 1);
        assert!(carousel.slide_marks()[current]);
        if let Some(marks) = carousel.indicator_marks() {
            assert_eq!(active_count(marks), 1);
            assert!(marks[current]);
        }
    }

    #[test]
    fn test_init_activates_first_slide() {
        let clock = Clock::new();
        let carousel = three_slides(&clock);

        assert_eq!(carousel.current(), Some(0));
        assert_single_active(&carousel);
        assert!(carousel.is_autoplaying());
        assert!(carousel.is_transitioning());
        assert_eq!(carousel.next_deadline(), Some(clock.at(1000)));
    }

    #[test]
    fn test_inert_without_slides() {
        let clock = Clock::new();
        let mut carousel = Carousel::init(CarouselOptions::new(0).with_indicators(0), clock.at(0));

        assert!(carousel.is_inert());
        assert_eq!(carousel.current(), None);
        assert!(!carousel.go_to(1, clock.at(10)));
        assert!(!carousel.move_by(1, clock.at(10)));
        assert!(!carousel.jump(2, clock.at(10)));
        carousel.pause(clock.at(10));
        carousel.resume(clock.at(10));
        carousel.advance(clock.at(60_000));
        carousel.dispose();

        assert_eq!(carousel.current(), None);
        assert_eq!(carousel.next_deadline(), None);
        assert!(!carousel.is_autoplaying());
        assert!(carousel.take_transitions().is_empty());
    }

    #[test]
    fn test_autoplay_advances_and_wraps() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);

        carousel.advance(clock.at(4999));
        assert_eq!(carousel.current(), Some(0));

        carousel.advance(clock.at(5000));
        assert_eq!(carousel.current(), Some(1));
        carousel.advance(clock.at(10_000));
        assert_eq!(carousel.current(), Some(2));
        carousel.advance(clock.at(15_000));
        assert_eq!(carousel.current(), Some(0));
        assert_single_active(&carousel);
    }

    #[test]
    fn test_late_advance_runs_every_missed_tick() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);
        carousel.take_transitions();

        carousel.advance(clock.at(10_500));
        let ticks = carousel.take_transitions();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].at, clock.at(5000));
        assert_eq!(ticks[1].at, clock.at(10_000));
        assert_eq!(carousel.current(), Some(2));
    }

    #[test]
    fn test_go_to_normalizes_any_integer() {
        for len in 1..=5usize {
            for k in -12i64..=12 {
                let clock = Clock::new();
                let mut carousel = Carousel::init(CarouselOptions::new(len), clock.at(0));
                assert!(carousel.go_to(k, clock.at(1500)));
                let n = len as i64;
                let expected = (((k % n) + n) % n) as usize;
                assert_eq!(carousel.current(), Some(expected), "k={} len={}", k, len);
                assert_single_active(&carousel);
            }
        }
    }

    #[test]
    fn test_second_go_to_inside_lock_is_dropped() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);

        assert!(carousel.go_to(1, clock.at(1500)));
        assert!(!carousel.go_to(2, clock.at(2000)));
        assert_eq!(carousel.current(), Some(1));

        // lock released at 2500
        assert!(carousel.go_to(2, clock.at(2500)));
        assert_eq!(carousel.current(), Some(2));
    }

    #[test]
    fn test_move_wraps_both_ways() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);

        assert!(carousel.move_by(-1, clock.at(1000)));
        assert_eq!(carousel.current(), Some(2));

        assert!(carousel.move_by(1, clock.at(2000)));
        assert_eq!(carousel.current(), Some(0));
        assert_single_active(&carousel);
    }

    #[test]
    fn test_move_restarts_full_period() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);

        carousel.move_by(1, clock.at(3000));
        assert_eq!(carousel.current(), Some(1));

        // the original 5000 tick was cancelled
        carousel.advance(clock.at(7999));
        assert_eq!(carousel.current(), Some(1));
        carousel.advance(clock.at(8000));
        assert_eq!(carousel.current(), Some(2));
    }

    #[test]
    fn test_manual_preempts_autoplay_lock_only() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);

        carousel.advance(clock.at(5000));
        assert_eq!(carousel.current(), Some(1));
        assert!(carousel.is_transitioning());

        // autoplay lock gives way to the user
        assert!(carousel.jump(0, clock.at(5000)));
        // the user's lock does not
        assert!(!carousel.jump(2, clock.at(5200)));
        assert!(!carousel.move_by(1, clock.at(5400)));
        assert_eq!(carousel.current(), Some(0));
    }

    #[test]
    fn test_tick_inside_manual_lock_is_dropped() {
        let clock = Clock::new();
        let options = CarouselOptions::new(3)
            .with_interval(Duration::from_millis(1000))
            .with_transition_lock(Duration::from_millis(1500));
        let mut carousel = Carousel::init(options, clock.at(0));

        // tick at 1000 lands inside the init lock and is dropped
        carousel.move_by(1, clock.at(1800));
        assert_eq!(carousel.current(), Some(1));

        // tick at 2800 lands inside the manual lock (until 3300)
        carousel.advance(clock.at(2800));
        assert_eq!(carousel.current(), Some(1));
        assert!(carousel.is_autoplaying());

        carousel.advance(clock.at(3800));
        assert_eq!(carousel.current(), Some(2));
    }

    #[test]
    fn test_pause_stops_autoplay_until_resume() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);

        carousel.pause(clock.at(0));
        carousel.advance(clock.at(6000));
        assert_eq!(carousel.current(), Some(0));
        assert!(!carousel.is_autoplaying());

        carousel.resume(clock.at(6000));
        carousel.advance(clock.at(10_999));
        assert_eq!(carousel.current(), Some(0));
        carousel.advance(clock.at(11_000));
        assert_eq!(carousel.current(), Some(1));
    }

    #[test]
    fn test_repeated_resume_keeps_one_timer() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);
        carousel.take_transitions();

        carousel.resume(clock.at(1000));
        carousel.resume(clock.at(2000));
        carousel.advance(clock.at(6999));
        assert!(carousel.take_transitions().is_empty());

        carousel.advance(clock.at(7000));
        assert_eq!(carousel.take_transitions().len(), 1);
    }

    #[test]
    fn test_dispose_cancels_everything() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);

        carousel.dispose();
        carousel.dispose();
        assert!(carousel.is_disposed());
        assert!(!carousel.is_transitioning());
        assert_eq!(carousel.next_deadline(), None);

        carousel.advance(clock.at(20_000));
        assert!(!carousel.go_to(2, clock.at(20_000)));
        carousel.resume(clock.at(20_000));
        carousel.advance(clock.at(40_000));
        assert_eq!(carousel.current(), Some(0));
    }

    #[test]
    fn test_scenario_tick_jump_and_dropped_go_to() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);
        assert_eq!(carousel.current(), Some(0));

        carousel.advance(clock.at(5000));
        assert_eq!(carousel.current(), Some(1));

        assert!(carousel.jump(0, clock.at(5000)));
        assert_eq!(carousel.current(), Some(0));
        assert_eq!(carousel.next_deadline(), Some(clock.at(6000)));

        assert!(!carousel.go_to(2, clock.at(5500)));
        assert_eq!(carousel.current(), Some(0));
        assert_single_active(&carousel);
    }

    #[test]
    fn test_indicators_absent_or_short() {
        let clock = Clock::new();
        let mut plain = Carousel::init(CarouselOptions::new(3), clock.at(0));
        assert_eq!(plain.indicator_marks(), None);
        plain.jump(2, clock.at(0));
        assert_eq!(plain.current(), Some(2));

        let mut short = Carousel::init(CarouselOptions::new(3).with_indicators(2), clock.at(0));
        assert!(short.jump(2, clock.at(0)));
        assert_eq!(short.indicator_marks(), Some(&[false, false][..]));
        assert_eq!(active_count(short.slide_marks()), 1);
    }

    #[test]
    fn test_progress_resets_on_transition() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);

        assert!((carousel.progress(clock.at(0)) - 0.0).abs() < 0.001);
        assert!((carousel.progress(clock.at(2500)) - 0.5).abs() < 0.001);

        carousel.jump(2, clock.at(2500));
        assert!((carousel.progress(clock.at(2500)) - 0.0).abs() < 0.001);
        assert!((carousel.progress(clock.at(9000)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_interval_disables_autoplay() {
        let clock = Clock::new();
        let options = CarouselOptions::new(3).with_interval(Duration::ZERO);
        let mut carousel = Carousel::init(options, clock.at(0));

        assert!(!carousel.is_autoplaying());
        assert_eq!(carousel.next_deadline(), Some(clock.at(1000)));
        carousel.advance(clock.at(60_000));
        assert_eq!(carousel.current(), Some(0));
        assert_eq!(carousel.progress(clock.at(100)), 0.0);
    }

    #[test]
    fn test_zero_lock_never_blocks() {
        let clock = Clock::new();
        let options = CarouselOptions::new(4).with_transition_lock(Duration::ZERO);
        let mut carousel = Carousel::init(options, clock.at(0));

        assert!(!carousel.is_transitioning());
        assert!(carousel.go_to(1, clock.at(0)));
        assert!(carousel.go_to(3, clock.at(0)));
        assert_eq!(carousel.current(), Some(3));
    }

    #[test]
    fn test_transition_log() {
        let clock = Clock::new();
        let mut carousel = three_slides(&clock);
        carousel.advance(clock.at(5000));
        carousel.move_by(-1, clock.at(7000));

        let log = carousel.take_transitions();
        let summary: Vec<_> = log.iter().map(|t| (t.from, t.to, t.origin)).collect();
        assert_eq!(
            summary,
            vec![
                (0, 0, Origin::Init),
                (0, 1, Origin::Autoplay),
                (1, 0, Origin::Manual),
            ]
        );
        assert!(carousel.take_transitions().is_empty());
    }
}
