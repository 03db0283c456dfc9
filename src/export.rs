use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Activity;
use crate::utils::parse_date;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    WriteError(String),
    #[error("Activity has an invalid date: {0}")]
    InvalidDate(String),
}

/// Write one markdown file per logged day under `out_dir`, laid out as
/// `<YYYY>/<MM-MonthName>/<DD>.md`. Returns the written paths.
pub fn export_to_markdown(
    activities: &[Activity],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    // Group by (year, month, day) keeping stored order within each day
    let mut grouped: BTreeMap<(String, String, String), Vec<&Activity>> = BTreeMap::new();
    for activity in activities {
        let date = parse_date(&activity.date)
            .map_err(|_| ExportError::InvalidDate(activity.date.clone()))?;
        let year = date.format("%Y").to_string();
        let month = date.format("%m-%B").to_string();
        let day = date.format("%d").to_string();
        grouped.entry((year, month, day)).or_default().push(activity);
    }

    let mut written = Vec::new();
    for ((year, month, day), day_activities) in grouped {
        let dir = out_dir.join(&year).join(&month);
        fs::create_dir_all(&dir).map_err(|e| ExportError::WriteError(e.to_string()))?;

        let content = markdown_content(&day_activities, &format!("{}-{}-{}", year, month, day));
        let path = dir.join(format!("{}.md", day));
        fs::write(&path, content).map_err(|e| ExportError::WriteError(e.to_string()))?;
        written.push(path);
    }

    Ok(written)
}

fn markdown_content(activities: &[&Activity], date: &str) -> String {
    let sections: Vec<String> = activities
        .iter()
        .map(|activity| {
            format!(
                "## Activity\n- Content: {}\n- Completed: {}\n",
                activity.content,
                if activity.completed { "✅" } else { "❌" }
            )
        })
        .collect();

    format!("# Activity Log - {}\n\n{}", date, sections.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(date: &str, content: &str, completed: bool) -> Activity {
        let mut a = Activity::new(date.to_string(), content.to_string());
        a.completed = completed;
        a
    }

    #[test]
    fn markdown_lists_each_activity_with_its_status() {
        let done = activity("2024-01-15", "ran 5k", true);
        let missed = activity("2024-01-15", "stretching", false);
        let content = markdown_content(&[&done, &missed], "2024-01-January-15");

        assert!(content.starts_with("# Activity Log - 2024-01-January-15\n\n"));
        assert!(content.contains("- Content: ran 5k\n- Completed: ✅"));
        assert!(content.contains("- Content: stretching\n- Completed: ❌"));
    }

    #[test]
    fn export_writes_one_file_per_day_in_year_month_tree() {
        let out = std::env::temp_dir().join(format!(
            "ember-export-test-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0)
        ));

        let activities = vec![
            activity("2024-01-15", "a", true),
            activity("2024-01-16", "b", true),
            activity("2023-12-31", "c", false),
        ];
        let written = export_to_markdown(&activities, &out).expect("export");

        assert_eq!(written.len(), 3);
        assert!(out.join("2024").join("01-January").join("15.md").exists());
        assert!(out.join("2024").join("01-January").join("16.md").exists());
        assert!(out.join("2023").join("12-December").join("31.md").exists());

        fs::remove_dir_all(&out).expect("cleanup");
    }

    #[test]
    fn export_rejects_invalid_dates() {
        let out = std::env::temp_dir().join("ember-export-invalid");
        let result = export_to_markdown(&[activity("yesterday", "a", true)], &out);
        assert!(matches!(result, Err(ExportError::InvalidDate(_))));
    }
}
