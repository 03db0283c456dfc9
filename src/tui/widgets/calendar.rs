use chrono::{Datelike, Months, NaiveDate};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// Render a month grid, Sun..Sat. Days with a logged activity are shown in
/// the accent color; the selected day gets the highlight background.
pub fn render_calendar(
    f: &mut Frame,
    area: Rect,
    month: NaiveDate,
    selected_date: NaiveDate,
    logged_dates: &[&str],
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let accent_color = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };

    let mut lines = Vec::new();

    // Weekday header row
    let header_spans: Vec<Span> = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        .iter()
        .map(|d| Span::styled(format!("{:^4}", d), Style::default().fg(fg_color)))
        .collect();
    lines.push(Line::from(header_spans));

    // Leading blanks up to the first weekday of the month
    let offset = month.weekday().num_days_from_sunday() as usize;
    let mut week: Vec<Span> = vec![Span::raw("    "); offset];

    for day in 1..=days_in_month(month) {
        let date = match NaiveDate::from_ymd_opt(month.year(), month.month(), day) {
            Some(d) => d,
            None => continue,
        };
        let date_str = date.format("%Y-%m-%d").to_string();
        let has_activity = logged_dates.contains(&date_str.as_str());
        let is_selected = date == selected_date;

        let style = if is_selected {
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else if has_activity {
            Style::default().fg(accent_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(fg_color)
        };

        // Activity days carry a dot marker next to the day number
        let marker = if has_activity { "•" } else { " " };
        week.push(Span::styled(format!(" {:>2}{}", day, marker), style));

        if week.len() == 7 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }

    let title = month.format("%B %Y").to_string();
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color));

    f.render_widget(paragraph, area);
}

fn days_in_month(month: NaiveDate) -> u32 {
    let next = month
        .checked_add_months(Months::new(1))
        .unwrap_or(month + chrono::Duration::days(31));
    next.signed_duration_since(month).num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_date;

    #[test]
    fn knows_month_lengths() {
        assert_eq!(days_in_month(parse_date("2024-01-01").expect("date")), 31);
        assert_eq!(days_in_month(parse_date("2024-02-01").expect("date")), 29);
        assert_eq!(days_in_month(parse_date("2023-02-01").expect("date")), 28);
        assert_eq!(days_in_month(parse_date("2024-04-01").expect("date")), 30);
    }
}
