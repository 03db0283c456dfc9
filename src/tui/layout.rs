use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub banner_area: Rect,
    pub calendar_area: Rect,
    pub log_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: 48 columns (calendar grid needs 30, log pane at least 16)
    /// Height: 14 lines (banner 3 + six-week calendar 9 + status 1 + borders)
    pub const MIN_WIDTH: u16 = 48;
    pub const MIN_HEIGHT: u16 = 14;

    pub fn calculate(size: Rect) -> Self {
        // Clamp to the minimum size so widgets never render into a zero area
        let min_width_with_border = Self::MIN_WIDTH + 2;
        let min_height_with_border = Self::MIN_HEIGHT + 2;
        let width = size.width.max(min_width_with_border);
        let height = size.height.max(min_height_with_border);
        let size = Rect::new(size.x, size.y, width, height);

        // Inner area accounts for the outer border (1 char on each side)
        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // Split vertically: streak banner (3), content, status (1)
        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Streak banner
                Constraint::Min(1),    // Content (calendar + log)
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        // Split content horizontally: calendar (fixed width), log
        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30), // 7 columns x 4 chars + borders
                Constraint::Min(1),
            ])
            .split(vertical[1]);

        Self {
            inner_area,
            banner_area: vertical[0],
            calendar_area: horizontal[0],
            log_area: horizontal[1],
            status_area: vertical[2],
        }
    }
}
