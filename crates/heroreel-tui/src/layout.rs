use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width in cells of one indicator dot, including padding
pub const DOT_WIDTH: u16 = 3;

/// Screen regions from the last draw
///
/// Mouse hit-testing reads this, so it always describes what is on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub hero: Rect,
    /// One rect per indicator dot, left to right
    pub indicators: Vec<Rect>,
    pub progress: Rect,
    pub stats: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    /// Split the terminal into hero, indicator row, progress bar, stats and status bar
    pub fn compute(area: Rect, indicator_count: usize, stat_count: usize) -> Self {
        let indicator_rows = if indicator_count > 0 { 1 } else { 0 };
        let stat_rows = if stat_count > 0 { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),                 // Hero
                Constraint::Length(indicator_rows), // Dots
                Constraint::Length(1),              // Progress
                Constraint::Length(stat_rows),      // Stats
                Constraint::Length(1),              // Status bar
            ])
            .split(area);

        Self {
            hero: chunks[0],
            indicators: dot_areas(chunks[1], indicator_count),
            progress: chunks[2],
            stats: chunks[3],
            status: chunks[4],
        }
    }

    /// Indicator dot under a terminal cell
    pub fn indicator_at(&self, column: u16, row: u16) -> Option<usize> {
        self.indicators
            .iter()
            .position(|rect| contains(*rect, column, row))
    }

    pub fn in_hero(&self, column: u16, row: u16) -> bool {
        contains(self.hero, column, row)
    }
}

/// Centered row of `count` dots inside `area`, clipped to its width
pub fn dot_areas(area: Rect, count: usize) -> Vec<Rect> {
    if area.height == 0 || count == 0 {
        return Vec::new();
    }

    let fit = (area.width / DOT_WIDTH) as usize;
    let shown = count.min(fit) as u16;
    let left = area.x + (area.width - shown * DOT_WIDTH) / 2;

    (0..shown)
        .map(|i| Rect::new(left + i * DOT_WIDTH, area.y, DOT_WIDTH, 1))
        .collect()
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
