//! Drag gesture classification
//!
//! A drag counts as a swipe only when it is mostly horizontal and longer
//! than the threshold, so vertical scrolling never flips slides.

/// Direction a swipe asks the carousel to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Leftward drag, show the following slide
    Next,
    /// Rightward drag, show the preceding slide
    Previous,
}

impl SwipeDirection {
    /// Step to pass to `move_by`
    #[inline]
    pub fn delta(&self) -> i64 {
        match self {
            SwipeDirection::Next => 1,
            SwipeDirection::Previous => -1,
        }
    }
}

/// Classify a drag by its displacement
pub fn classify(dx: f64, dy: f64, threshold: f64) -> Option<SwipeDirection> {
    if dx.abs() > dy.abs() && dx.abs() > threshold {
        if dx < 0.0 {
            Some(SwipeDirection::Next)
        } else {
            Some(SwipeDirection::Previous)
        }
    } else {
        None
    }
}

/// Tracks one pointer from press to release
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Record where the pointer went down
    pub fn begin(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Pointer released at (x, y); yields a direction if the drag was a swipe
    pub fn end(&mut self, x: f64, y: f64) -> Option<SwipeDirection> {
        let (start_x, start_y) = self.start.take()?;
        classify(x - start_x, y - start_y, self.threshold)
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leftward_drag_is_next() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.begin(200.0, 100.0);
        assert_eq!(tracker.end(140.0, 100.0), Some(SwipeDirection::Next));
        assert_eq!(SwipeDirection::Next.delta(), 1);
    }

    #[test]
    fn test_rightward_drag_is_previous() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.begin(100.0, 100.0);
        assert_eq!(tracker.end(160.0, 110.0), Some(SwipeDirection::Previous));
        assert_eq!(SwipeDirection::Previous.delta(), -1);
    }

    #[test]
    fn test_short_or_vertical_drags_are_ignored() {
        assert_eq!(classify(-40.0, 0.0, 50.0), None);
        assert_eq!(classify(50.0, 0.0, 50.0), None);
        assert_eq!(classify(60.0, 80.0, 50.0), None);
        assert_eq!(classify(-60.0, -60.0, 50.0), None);
    }

    #[test]
    fn test_end_without_begin() {
        let mut tracker = SwipeTracker::new(50.0);
        assert_eq!(tracker.end(0.0, 0.0), None);

        tracker.begin(0.0, 0.0);
        assert!(tracker.is_tracking());
        tracker.cancel();
        assert_eq!(tracker.end(-100.0, 0.0), None);
    }
}
