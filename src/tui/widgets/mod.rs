pub mod activity_list;
pub mod calendar;
pub mod color;
pub mod confirm_delete;
pub mod entry_form;
pub mod help;
pub mod status_bar;
pub mod streak_banner;
