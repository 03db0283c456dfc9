use chrono::{Datelike, Months, NaiveDate};
use ratatui::widgets::ListState;
use std::time::Instant;

use crate::models::{Activity, Streak};
use crate::store::{ActivityStore, StoreError};
use crate::utils::current_date;
use crate::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    /// Typing the content of a new activity for the selected date
    Entry,
    /// Rewriting the content of the selected date's activity
    Edit,
    Help,
}

/// How long a status message stays on screen
const STATUS_MESSAGE_SECS: u64 = 3;

pub struct App {
    pub config: Config,
    pub store: ActivityStore,
    pub activities: Vec<Activity>,
    pub streak: Streak,
    /// First day of the month the calendar is showing
    pub month: NaiveDate,
    pub selected_date: NaiveDate,
    pub list_state: ListState,
    pub mode: Mode,
    /// Content buffer for Entry/Edit modes
    pub input: String,
    /// Date awaiting delete confirmation, if any
    pub delete_pending: Option<String>,
    /// 0 = Delete, 1 = Cancel
    pub delete_modal_selection: usize,
    pub status_message: Option<String>,
    status_message_set_at: Option<Instant>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: ActivityStore) -> Self {
        let today = current_date();
        let mut app = Self {
            config,
            store,
            activities: Vec::new(),
            streak: Streak::default(),
            month: first_of_month(today),
            selected_date: today,
            list_state: ListState::default(),
            mode: Mode::View,
            input: String::new(),
            delete_pending: None,
            delete_modal_selection: 0,
            status_message: None,
            status_message_set_at: None,
            should_quit: false,
        };
        if let Err(e) = app.reload() {
            app.set_status_message(format!("Failed to load activities: {}", e));
        }
        app
    }

    /// Re-read activities and the streak aggregate from the store
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.activities = self.store.list_all()?;
        self.streak = self.store.streak()?;

        // Keep the list selection inside the (possibly shrunk) filtered list
        let count = self.selected_activities().len();
        if count == 0 {
            self.list_state.select(None);
        } else {
            match self.list_state.selected() {
                Some(i) if i >= count => self.list_state.select(Some(count - 1)),
                None => self.list_state.select(Some(0)),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn selected_date_string(&self) -> String {
        self.selected_date.format("%Y-%m-%d").to_string()
    }

    /// Activities logged for the selected calendar date, in stored order.
    /// Usually zero or one; more when append_mode is "insert".
    pub fn selected_activities(&self) -> Vec<&Activity> {
        let date = self.selected_date_string();
        self.activities.iter().filter(|a| a.date == date).collect()
    }

    /// Dates (YYYY-MM-DD) that have at least one activity
    pub fn logged_dates(&self) -> Vec<&str> {
        self.activities.iter().map(|a| a.date.as_str()).collect()
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.month = first_of_month(date);
        let count = self.selected_activities().len();
        self.list_state
            .select(if count > 0 { Some(0) } else { None });
    }

    pub fn move_selection_days(&mut self, days: i64) {
        let next = self.selected_date + chrono::Duration::days(days);
        self.select_date(next);
    }

    pub fn previous_month(&mut self) {
        if let Some(prev) = self.month.checked_sub_months(Months::new(1)) {
            self.select_date(prev);
        }
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.month.checked_add_months(Months::new(1)) {
            self.select_date(next);
        }
    }

    pub fn jump_to_today(&mut self) {
        self.select_date(current_date());
    }

    pub fn list_up(&mut self) {
        let count = self.selected_activities().len();
        if count == 0 {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }

    pub fn list_down(&mut self) {
        let count = self.selected_activities().len();
        if count == 0 {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((i + 1).min(count - 1)));
    }

    /// Start logging a new activity for the selected date
    pub fn enter_entry_mode(&mut self) {
        self.input.clear();
        self.mode = Mode::Entry;
    }

    /// Start editing the selected date's activity. No-op if nothing is
    /// logged for that date.
    pub fn enter_edit_mode(&mut self) {
        let date = self.selected_date_string();
        if let Some(activity) = self.activities.iter().find(|a| a.date == date) {
            self.input = activity.content.clone();
            self.mode = Mode::Edit;
        } else {
            self.set_status_message(format!("No activity logged for {}", date));
        }
    }

    /// Save the Entry/Edit buffer. Empty content is rejected.
    pub fn submit_input(&mut self) -> Result<(), StoreError> {
        let content = self.input.trim().to_string();
        if content.is_empty() {
            self.set_status_message("Activity content must not be empty".to_string());
            return Ok(());
        }

        let date = self.selected_date_string();
        match self.mode {
            Mode::Entry => {
                self.store
                    .append(Activity::new(date.clone(), content))?;
                self.set_status_message(format!("Activity logged for {}", date));
            }
            Mode::Edit => {
                self.store.edit(&date, &content)?;
                self.set_status_message(format!("Activity for {} updated", date));
            }
            _ => {}
        }

        self.input.clear();
        self.mode = Mode::View;
        self.reload()
    }

    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.mode = Mode::View;
    }

    /// Ask for confirmation before deleting the selected date's activity
    pub fn request_delete(&mut self) {
        let date = self.selected_date_string();
        if self.activities.iter().any(|a| a.date == date) {
            self.delete_pending = Some(date);
            self.delete_modal_selection = 0;
        } else {
            self.set_status_message(format!("No activity logged for {}", date));
        }
    }

    pub fn confirm_delete(&mut self) -> Result<(), StoreError> {
        if let Some(date) = self.delete_pending.take() {
            self.store.delete(&date)?;
            self.set_status_message(format!("Activity for {} deleted", date));
            self.reload()?;
        }
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.delete_pending = None;
    }

    /// Export all activities to the configured export directory
    pub fn export_all(&mut self) {
        if self.activities.is_empty() {
            self.set_status_message("Nothing to export".to_string());
            return;
        }
        let out_dir = self.config.get_export_dir();
        match crate::export::export_to_markdown(&self.activities, &out_dir) {
            Ok(written) => self.set_status_message(format!(
                "Exported {} file(s) to {}",
                written.len(),
                out_dir.display()
            )),
            Err(e) => self.set_status_message(format!("Export failed: {}", e)),
        }
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_set_at = Some(Instant::now());
    }

    /// Clear the status message once it has been on screen long enough
    pub fn check_status_message_timeout(&mut self) {
        if let Some(set_at) = self.status_message_set_at {
            if set_at.elapsed().as_secs() >= STATUS_MESSAGE_SECS {
                self.status_message = None;
                self.status_message_set_at = None;
            }
        }
    }
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AppendMode;
    use crate::storage::Storage;
    use crate::utils::parse_date;

    fn app() -> App {
        let storage = Storage::open_in_memory().expect("open storage");
        App::new(Config::default(), ActivityStore::new(storage, AppendMode::Upsert))
    }

    #[test]
    fn selecting_a_date_moves_the_calendar_month() {
        let mut app = app();
        app.select_date(parse_date("2024-07-20").expect("date"));
        assert_eq!(app.month, parse_date("2024-07-01").expect("date"));
        assert_eq!(app.selected_date_string(), "2024-07-20");
    }

    #[test]
    fn month_paging_keeps_the_first_of_month() {
        let mut app = app();
        app.select_date(parse_date("2024-03-31").expect("date"));
        app.next_month();
        assert_eq!(app.month, parse_date("2024-04-01").expect("date"));
        app.previous_month();
        assert_eq!(app.month, parse_date("2024-03-01").expect("date"));
    }

    #[test]
    fn submit_entry_persists_and_reloads() {
        let mut app = app();
        app.select_date(parse_date("2024-05-05").expect("date"));
        app.enter_entry_mode();
        app.input = "read a chapter".to_string();
        app.submit_input().expect("submit");

        assert_eq!(app.mode, Mode::View);
        assert_eq!(app.selected_activities().len(), 1);
        assert_eq!(app.streak.count, 1);
    }

    #[test]
    fn empty_input_is_rejected_and_stays_unlogged() {
        let mut app = app();
        app.enter_entry_mode();
        app.input = "   ".to_string();
        app.submit_input().expect("submit");

        assert_eq!(app.activities.len(), 0);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn edit_mode_requires_an_existing_activity() {
        let mut app = app();
        app.enter_edit_mode();
        assert_eq!(app.mode, Mode::View);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn confirmed_delete_removes_the_activity() {
        let mut app = app();
        app.enter_entry_mode();
        app.input = "something".to_string();
        app.submit_input().expect("submit");

        app.request_delete();
        assert!(app.delete_pending.is_some());
        app.confirm_delete().expect("delete");

        assert_eq!(app.activities.len(), 0);
        assert_eq!(app.streak.count, 0);
    }
}
