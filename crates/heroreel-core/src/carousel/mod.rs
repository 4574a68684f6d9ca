//! Hero carousel: autoplay rotation and input arbitration
//!
//! Keeps exactly one slide (and indicator) active, advances it on a fixed
//! cadence and arbitrates between automatic ticks and user commands with a
//! time-boxed transition lock.
//!
//! # Layers
//!
//! ## Atoms
//! - `index` - Floored-modulo index arithmetic
//! - `timing` - Deadline-based interval timer and progress calculation
//! - `swipe` - Drag gesture to direction classification
//!
//! ## Molecules
//! - `engine` - Deterministic state machine driven by explicit instants
//!
//! ## Organisms
//! - `service` - Tokio task owning an engine, with a cloneable command handle
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Instant;
//! use heroreel_core::carousel::{Carousel, CarouselOptions};
//!
//! let mut carousel = Carousel::init(CarouselOptions::new(3), Instant::now());
//!
//! // User pressed the right arrow
//! carousel.move_by(1, Instant::now());
//!
//! // In the main loop, run due timers
//! carousel.advance(Instant::now());
//! let active = carousel.current();
//! ```

pub mod index;
pub mod swipe;
pub mod timing;

pub mod engine;

pub mod service;

pub use engine::{Carousel, CarouselOptions, Origin, Transition};
pub use service::{CarouselCommand, CarouselEvent, CarouselHandle, CarouselService, CarouselSnapshot};
pub use swipe::{SwipeDirection, SwipeTracker};
