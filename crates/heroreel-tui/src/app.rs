use std::sync::Arc;
use std::time::{Duration, Instant};

use heroreel_core::carousel::{Carousel, SwipeTracker};
use heroreel_core::config::SlideConfig;
use heroreel_core::counter::StatCounter;
use heroreel_core::AppConfig;
use tracing::{debug, info};

use crate::input::Action;
use crate::layout::ScreenLayout;
use crate::theme::Theme;
use crate::themes::load_theme;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub carousel: Carousel,
    /// Pointer drag in progress over the hero
    pub swipe: SwipeTracker,
    pub stats: Vec<StatCounter>,
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Autoplay turned off with the toggle key (or by config)
    pub user_paused: bool,
    /// Pointer resting over the hero
    pub hovering: bool,
    /// Regions from the last draw
    pub layout: ScreenLayout,
}

impl App {
    pub fn new(config: Arc<AppConfig>, now: Instant) -> Self {
        let options = config.carousel.options(config.slides.len());
        let mut carousel = Carousel::init(options, now);

        let user_paused = !config.carousel.autoplay;
        if user_paused {
            carousel.pause(now);
        }

        let duration = Duration::from_millis(config.ui.counter_duration_ms);
        let stats = config
            .stats
            .iter()
            .map(|stat| StatCounter::from_config(stat, duration, config.ui.counter_easing))
            .collect();

        let mut app = Self {
            theme: load_theme(&config.ui.theme),
            swipe: SwipeTracker::new(config.carousel.swipe_threshold_px),
            carousel,
            stats,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            user_paused,
            hovering: false,
            layout: ScreenLayout::default(),
            config,
        };
        app.log_transitions();
        app
    }

    /// Slide currently shown
    pub fn current_slide(&self) -> Option<&SlideConfig> {
        self.carousel
            .current()
            .and_then(|index| self.config.slides.get(index))
    }

    /// Whether autoplay is held off by the user or the pointer
    pub fn is_suspended(&self) -> bool {
        self.user_paused || self.hovering
    }

    /// Earliest instant the carousel needs servicing
    pub fn next_deadline(&self) -> Option<Instant> {
        self.carousel.next_deadline()
    }

    /// Run carousel timers that fell due
    pub fn tick(&mut self, now: Instant) {
        self.carousel.advance(now);
        self.log_transitions();
    }

    /// Record the regions drawn this frame
    ///
    /// Counters start the first time the stats row is actually visible.
    pub fn set_layout(&mut self, layout: ScreenLayout, now: Instant) {
        if layout.stats.height > 0 {
            self.start_counters(now);
        }
        self.layout = layout;
    }

    /// Start every count-up that has not started yet
    pub fn start_counters(&mut self, now: Instant) {
        for stat in &mut self.stats {
            stat.counter.start(now);
        }
    }

    /// Apply an input action
    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::PrevSlide => self.step(-1, now),
            Action::NextSlide => self.step(1, now),
            Action::JumpTo(index) => self.jump_to(index, now),
            Action::ToggleAutoplay => self.toggle_autoplay(now),
            Action::ShowHelp => self.mode = Mode::Help,
            Action::ExitMode => {
                self.mode = Mode::Normal;
                self.status_message = None;
            }
            Action::PointerDown { column, row } => {
                let (x, y) = self.to_pixels(column, row);
                self.swipe.begin(x, y);
            }
            Action::PointerUp { column, row } => {
                let (x, y) = self.to_pixels(column, row);
                if let Some(direction) = self.swipe.end(x, y) {
                    debug!("Swipe {:?}", direction);
                    self.step(direction.delta(), now);
                }
            }
            Action::PointerMoved { column, row } => {
                let over = self.layout.in_hero(column, row);
                self.set_hovering(over, now);
            }
            Action::None => {}
        }
        self.log_transitions();
    }

    fn step(&mut self, delta: i64, now: Instant) {
        self.carousel.move_by(delta, now);
        self.hold_if_suspended(now);
    }

    fn jump_to(&mut self, index: usize, now: Instant) {
        if index >= self.carousel.len() {
            self.status_message = Some(format!("No slide {}", index + 1));
            return;
        }
        self.carousel.jump(index as i64, now);
        self.hold_if_suspended(now);
    }

    /// Navigation restarts autoplay; put it back on hold if it was held
    fn hold_if_suspended(&mut self, now: Instant) {
        if self.is_suspended() {
            self.carousel.pause(now);
        }
    }

    fn toggle_autoplay(&mut self, now: Instant) {
        self.user_paused = !self.user_paused;
        if self.user_paused {
            self.carousel.pause(now);
            self.status_message = Some("Autoplay paused".to_string());
        } else {
            if !self.hovering {
                self.carousel.resume(now);
            }
            self.status_message = Some("Autoplay resumed".to_string());
        }
        info!("Autoplay toggled: paused={}", self.user_paused);
    }

    fn set_hovering(&mut self, over: bool, now: Instant) {
        if over == self.hovering {
            return;
        }
        self.hovering = over;
        if over {
            self.carousel.pause(now);
        } else if !self.user_paused {
            self.carousel.resume(now);
        }
    }

    /// Approximate pixel position of a terminal cell
    fn to_pixels(&self, column: u16, row: u16) -> (f64, f64) {
        (
            f64::from(column) * f64::from(self.config.ui.cell_width_px),
            f64::from(row) * f64::from(self.config.ui.cell_height_px),
        )
    }

    fn log_transitions(&mut self) {
        for transition in self.carousel.take_transitions() {
            debug!(
                "Slide {} -> {} ({})",
                transition.from,
                transition.to,
                transition.origin.as_str()
            );
        }
    }
}
