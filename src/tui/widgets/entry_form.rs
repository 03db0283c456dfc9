use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::parse_color;

/// Single-line content input rendered as a centered popup
pub fn render_entry_form(f: &mut Frame, area: Rect, title: &str, input: &str, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 20);

    // Clear the background first so content doesn't show through
    f.render_widget(Clear, popup_area);

    // Keep the tail of the input visible when it outgrows the popup
    let inner_width = popup_area.width.saturating_sub(2) as usize;
    let visible: String = if input.chars().count() >= inner_width {
        input
            .chars()
            .skip(input.chars().count() + 1 - inner_width)
            .collect()
    } else {
        input.to_string()
    };

    let paragraph = Paragraph::new(visible.clone())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color));

    f.render_widget(paragraph, popup_area);

    // Place the terminal cursor after the typed text
    let cursor_x = popup_area.x + 1 + visible.chars().count() as u16;
    let cursor_y = popup_area.y + 1;
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}

/// Helper function to create a centered rect using up certain percentage of the available rect
/// Based on ratatui popup example: https://ratatui.rs/examples/apps/popup/
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
