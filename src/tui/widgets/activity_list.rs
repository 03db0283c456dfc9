use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState,
    StatefulWidget,
};

use crate::Config;
use crate::models::Activity;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

pub fn render_activity_list(
    f: &mut Frame,
    area: Rect,
    activities: &[Activity],
    total_count: usize,
    selected_date: &str,
    list_state: &mut ListState,
    config: &Config,
) {
    // Account for borders and padding when truncating
    let max_width = area.width.saturating_sub(4) as usize;

    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };

    let items: Vec<ListItem> = if activities.is_empty() {
        vec![ListItem::new("No activity logged for this day")
            .style(Style::default().fg(parse_color(&active_theme.accent)))]
    } else {
        activities
            .iter()
            .map(|activity| {
                let status_indicator = if activity.completed { "✓" } else { "✗" };
                let mut line = format!("{} {}", status_indicator, activity.content);

                if line.chars().count() > max_width {
                    line = line.chars().take(max_width.saturating_sub(3)).collect::<String>() + "...";
                }

                ListItem::new(line)
            })
            .collect()
    };

    // Reserve a column for the scrollbar
    let list_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let list_area = list_areas[0];
    let scrollbar_area = list_areas[1];

    let title = format!("{} ({} total)", selected_date, total_count);
    let item_count = items.len();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, list_area, f.buffer_mut(), list_state);

    // Render scrollbar if the list overflows
    let visible_items = list_area.height.saturating_sub(2) as usize;
    if item_count > visible_items && scrollbar_area.width > 0 && list_area.height > 2 {
        let scrollbar_inner_area = Rect::new(
            scrollbar_area.x,
            list_area.y + 1,
            scrollbar_area.width,
            list_area.height.saturating_sub(2),
        );

        let selected_index = list_state.selected().unwrap_or(0);
        let scroll_position = if selected_index < visible_items {
            0
        } else {
            selected_index.saturating_sub(visible_items - 1)
        };

        let mut scrollbar_state = ScrollbarState::new(item_count)
            .viewport_content_length(visible_items)
            .position(scroll_position);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
    }
}
