use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::models::Streak;
use crate::tui::widgets::color::parse_color;
use crate::utils::current_date_string;

pub fn render_streak_banner(f: &mut Frame, area: Rect, streak: &Streak, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let accent_color = parse_color(&active_theme.accent);

    // The flame only burns bright when today is already logged
    let is_active = streak.last_activity_date.as_deref() == Some(current_date_string().as_str());

    let flame_style = if is_active {
        Style::default().fg(accent_color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fg_color)
    };

    let encouragement = if streak.count > 0 {
        "Keep it going!"
    } else {
        "Start your streak today!"
    };

    let line = Line::from(vec![
        Span::styled("🔥 ", flame_style),
        Span::styled(
            format!("{} Day Streak", streak.count),
            Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", encouragement),
            Style::default().fg(fg_color),
        ),
    ]);

    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color));

    f.render_widget(paragraph, area);
}
