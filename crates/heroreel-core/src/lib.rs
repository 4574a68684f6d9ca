pub mod carousel;
pub mod config;
pub mod counter;
pub mod easing;
pub mod error;

pub use carousel::{Carousel, CarouselHandle, CarouselOptions, CarouselService};
pub use config::{AppConfig, EasingType};
pub use error::{Error, Result};
