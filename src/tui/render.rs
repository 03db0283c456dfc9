use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::Mode;
use crate::tui::widgets::{
    activity_list::render_activity_list,
    calendar::render_calendar,
    color::parse_color,
    confirm_delete::render_confirm_delete,
    entry_form::render_entry_form,
    help::render_help,
    status_bar::render_status_bar,
    streak_banner::render_streak_banner,
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    // Outer border with the app name centered in the top border
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("EMBER")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_streak_banner(f, layout.banner_area, &app.streak, &app.config);

    render_calendar(
        f,
        layout.calendar_area,
        app.month,
        app.selected_date,
        &app.logged_dates(),
        &app.config,
    );

    let selected = app.selected_activities();
    let activities: Vec<_> = selected.into_iter().cloned().collect();
    let total_count = app.activities.len();
    render_activity_list(
        f,
        layout.log_area,
        &activities,
        total_count,
        &app.selected_date_string(),
        &mut app.list_state,
        &app.config,
    );

    // Popup overlays render after the normal content
    match app.mode {
        Mode::Entry => {
            let title = format!("Log activity - {}", app.selected_date_string());
            render_entry_form(f, f.area(), &title, &app.input, &app.config);
        }
        Mode::Edit => {
            let title = format!("Edit activity - {}", app.selected_date_string());
            render_entry_form(f, f.area(), &title, &app.input, &app.config);
        }
        Mode::Help => {
            render_help(f, f.area(), &app.config);
        }
        Mode::View => {}
    }

    if let Some(ref date) = app.delete_pending {
        render_confirm_delete(f, f.area(), date, app.delete_modal_selection, &app.config);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status_message.as_ref(),
        &key_hints,
        &app.config,
    );
}

fn get_key_hints(app: &App) -> Vec<String> {
    let bindings = &app.config.key_bindings;
    match app.mode {
        Mode::Entry | Mode::Edit => {
            vec!["Enter: Save".to_string(), "Esc: Cancel".to_string()]
        }
        Mode::Help => {
            vec![format!(
                "Esc or {}: Exit help",
                format_key_binding_for_display(&bindings.help)
            )]
        }
        Mode::View => {
            if app.delete_pending.is_some() {
                return vec![
                    "←/→: Choose".to_string(),
                    "Enter: Confirm".to_string(),
                    "Esc: Cancel".to_string(),
                ];
            }
            vec![
                format!("{}: Quit", format_key_binding_for_display(&bindings.quit)),
                format!("{}: Log", format_key_binding_for_display(&bindings.new)),
                format!("{}: Edit", format_key_binding_for_display(&bindings.edit)),
                format!("{}: Delete", format_key_binding_for_display(&bindings.delete)),
                format!("{}: Export", format_key_binding_for_display(&bindings.export)),
                format!("{}: Today", format_key_binding_for_display(&bindings.today)),
                format!(
                    "{}/{}: Month",
                    format_key_binding_for_display(&bindings.prev_month),
                    format_key_binding_for_display(&bindings.next_month)
                ),
                format!("{}: Help", format_key_binding_for_display(&bindings.help)),
            ]
        }
    }
}
