use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 70);

    // Clear the background first so content doesn't show through
    f.render_widget(Clear, popup_area);

    let help_text = build_help_text(config);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
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

fn build_help_text(config: &Config) -> String {
    let bindings = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Calendar:\n");
    text.push_str("  Arrow keys: Move the selected day\n");
    text.push_str(&format!(
        "  {} / {}: Previous / next month\n",
        format_key_binding_for_display(&bindings.prev_month),
        format_key_binding_for_display(&bindings.next_month)
    ));
    text.push_str(&format!(
        "  {}: Jump to today\n",
        format_key_binding_for_display(&bindings.today)
    ));
    text.push('\n');

    text.push_str("Activities:\n");
    text.push_str(&format!(
        "  {}: Log an activity for the selected day\n",
        format_key_binding_for_display(&bindings.new)
    ));
    text.push_str(&format!(
        "  {}: Edit the selected day's activity\n",
        format_key_binding_for_display(&bindings.edit)
    ));
    text.push_str(&format!(
        "  {}: Delete the selected day's activity\n",
        format_key_binding_for_display(&bindings.delete)
    ));
    text.push_str(&format!(
        "  {} / {}: Move in the log list\n",
        format_key_binding_for_display(&bindings.list_up),
        format_key_binding_for_display(&bindings.list_down)
    ));
    text.push_str(&format!(
        "  {}: Export all activities as markdown\n",
        format_key_binding_for_display(&bindings.export)
    ));
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!(
        "  {}: Quit\n",
        format_key_binding_for_display(&bindings.quit)
    ));
    text.push_str(&format!(
        "  {}: Show/hide help\n",
        format_key_binding_for_display(&bindings.help)
    ));

    text
}
