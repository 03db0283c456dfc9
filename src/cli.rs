use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::export::{self, ExportError};
use crate::models::Activity;
use crate::store::{ActivityStore, StoreError};
use crate::utils::{current_date_string, parse_date};
use std::path::Path;

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Daily activity and streak tracker for the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Log an activity for a day
    Log {
        /// What was done
        content: String,
        /// Date to log for (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Mark the activity as not completed
        #[arg(long)]
        missed: bool,
    },
    /// List logged activities
    List {
        /// Only show activities for this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the activity logged for a date
    Show {
        /// Date to look up (YYYY-MM-DD)
        date: String,
    },
    /// Rewrite the content of a logged activity
    Edit {
        /// Date of the activity (YYYY-MM-DD)
        date: String,
        /// New content
        content: String,
    },
    /// Delete the activity logged for a date
    Delete {
        /// Date of the activity (YYYY-MM-DD)
        date: String,
    },
    /// Show the current streak
    Streak,
    /// Export all activities as markdown files
    Export {
        /// Output directory (defaults to export_dir from config)
        #[arg(long)]
        out: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Activity content must not be empty")]
    EmptyContent,
}

fn validate_date(date_str: &str) -> Result<(), CliError> {
    parse_date(date_str)
        .map(|_| ())
        .map_err(|e| CliError::DateParseError(format!("Invalid date format '{}': {}", date_str, e)))
}

/// Handle the log command
pub fn handle_log(
    content: String,
    date: Option<String>,
    missed: bool,
    store: &ActivityStore,
) -> Result<(), CliError> {
    if content.trim().is_empty() {
        return Err(CliError::EmptyContent);
    }

    let date = match date {
        Some(date_str) => {
            validate_date(&date_str)?;
            date_str
        }
        None => current_date_string(),
    };

    let mut activity = Activity::new(date.clone(), content);
    activity.completed = !missed;

    store.append(activity)?;
    let streak = store.streak()?;
    println!("Activity logged for {} (streak: {} days)", date, streak.count);

    Ok(())
}

/// Handle the list command
pub fn handle_list(date: Option<String>, store: &ActivityStore) -> Result<(), CliError> {
    if let Some(ref date_str) = date {
        validate_date(date_str)?;
    }

    let mut activities = store.list_all()?;
    if let Some(ref date_str) = date {
        activities.retain(|a| a.date == *date_str);
    }

    if activities.is_empty() {
        println!("No activities logged");
        return Ok(());
    }

    // Newest first for display, matching the log view
    activities.sort_by(|a, b| b.date.cmp(&a.date));
    for activity in &activities {
        let status = if activity.completed { "✓" } else { "✗" };
        println!("{} {} {}", activity.date, status, activity.content);
    }

    Ok(())
}

/// Handle the show command
pub fn handle_show(date: String, store: &ActivityStore) -> Result<(), CliError> {
    validate_date(&date)?;

    match store.get_by_date(&date)? {
        Some(activity) => {
            let status = if activity.completed { "✓" } else { "✗" };
            println!("{} {} {}", activity.date, status, activity.content);
        }
        None => println!("No activity logged for {}", date),
    }

    Ok(())
}

/// Handle the edit command
pub fn handle_edit(date: String, content: String, store: &ActivityStore) -> Result<(), CliError> {
    validate_date(&date)?;
    if content.trim().is_empty() {
        return Err(CliError::EmptyContent);
    }

    if store.get_by_date(&date)?.is_none() {
        println!("No activity logged for {}", date);
        return Ok(());
    }

    store.edit(&date, &content)?;
    println!("Activity for {} updated", date);

    Ok(())
}

/// Handle the delete command
pub fn handle_delete(date: String, store: &ActivityStore) -> Result<(), CliError> {
    validate_date(&date)?;

    if store.get_by_date(&date)?.is_none() {
        println!("No activity logged for {}", date);
        return Ok(());
    }

    store.delete(&date)?;
    println!("Activity for {} deleted", date);

    Ok(())
}

/// Handle the streak command
pub fn handle_streak(store: &ActivityStore) -> Result<(), CliError> {
    let streak = store.streak()?;
    match streak.last_activity_date {
        Some(date) => println!("{} day streak (last activity: {})", streak.count, date),
        None => println!("No streak yet - log an activity to start one"),
    }

    Ok(())
}

/// Handle the export command
pub fn handle_export(out_dir: &Path, store: &ActivityStore) -> Result<(), CliError> {
    let activities = store.list_all()?;
    if activities.is_empty() {
        println!("Nothing to export");
        return Ok(());
    }

    let written = export::export_to_markdown(&activities, out_dir)?;
    println!("Exported {} file(s) to {}", written.len(), out_dir.display());

    Ok(())
}
