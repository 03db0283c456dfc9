use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Activity, Streak};
use crate::storage::{Storage, StorageError};
use crate::streak;
use crate::utils::current_date;

/// Slot holding the JSON array of activity records
pub const ACTIVITIES_SLOT: &str = "activities";
/// Slot holding the single JSON streak aggregate
pub const STREAK_SLOT: &str = "streak";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Failed to encode slot value: {0}")]
    EncodeError(#[from] serde_json::Error),
}

/// What a slot read actually found. Callers that only care about the
/// well-formed case collapse `Missing` and `Corrupt` into the default value;
/// keeping them distinct here makes a corrupted store diagnosable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    Missing,
    Corrupt,
    Value(T),
}

impl<T: Default> Slot<T> {
    pub fn value_or_default(self) -> T {
        match self {
            Slot::Value(v) => v,
            Slot::Missing | Slot::Corrupt => T::default(),
        }
    }
}

/// How `append` treats a second record for an already-logged date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppendMode {
    /// Replace the existing record for that date (one record per day)
    #[default]
    Upsert,
    /// Always push, letting duplicate dates coexist
    Insert,
}

/// CRUD over the activity collection plus maintenance of the streak
/// aggregate. Owns its storage handle; construct one wherever the
/// application is wired together rather than reaching for globals.
pub struct ActivityStore {
    storage: Storage,
    append_mode: AppendMode,
}

impl ActivityStore {
    pub fn new(storage: Storage, append_mode: AppendMode) -> Self {
        Self {
            storage,
            append_mode,
        }
    }

    fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Result<Slot<T>, StoreError> {
        match self.storage.read(key)? {
            None => Ok(Slot::Missing),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Slot::Value(value)),
                Err(_) => Ok(Slot::Corrupt),
            },
        }
    }

    fn write_slot<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.storage.write(key, &raw)?;
        Ok(())
    }

    /// Read the activities slot, distinguishing a missing slot from a
    /// corrupt one. A blob containing any record with empty content fails
    /// shape validation as a whole; malformed data is never partially
    /// repaired.
    pub fn activities_slot(&self) -> Result<Slot<Vec<Activity>>, StoreError> {
        match self.read_slot::<Vec<Activity>>(ACTIVITIES_SLOT)? {
            Slot::Value(activities) => {
                if activities.iter().any(|a| a.content.is_empty()) {
                    Ok(Slot::Corrupt)
                } else {
                    Ok(Slot::Value(activities))
                }
            }
            other => Ok(other),
        }
    }

    /// All persisted activities in stored order. Missing or corrupt data
    /// reads as an empty collection.
    pub fn list_all(&self) -> Result<Vec<Activity>, StoreError> {
        Ok(self.activities_slot()?.value_or_default())
    }

    /// Read the streak slot, distinguishing a missing slot from a corrupt
    /// one. A count without a last-activity date (or the reverse) fails
    /// shape validation: the two fields are only ever written together.
    pub fn streak_slot(&self) -> Result<Slot<Streak>, StoreError> {
        match self.read_slot::<Streak>(STREAK_SLOT)? {
            Slot::Value(streak) => {
                let consistent = (streak.count == 0) == streak.last_activity_date.is_none();
                if consistent {
                    Ok(Slot::Value(streak))
                } else {
                    Ok(Slot::Corrupt)
                }
            }
            other => Ok(other),
        }
    }

    /// Persist one activity and recompute the streak aggregate
    pub fn append(&self, activity: Activity) -> Result<(), StoreError> {
        self.append_at(activity, current_date())
    }

    pub(crate) fn append_at(&self, activity: Activity, today: NaiveDate) -> Result<(), StoreError> {
        let mut activities = self.list_all()?;
        match self.append_mode {
            AppendMode::Upsert => {
                if let Some(existing) = activities.iter_mut().find(|a| a.date == activity.date) {
                    *existing = activity;
                } else {
                    activities.push(activity);
                }
            }
            AppendMode::Insert => activities.push(activity),
        }
        self.write_slot(ACTIVITIES_SLOT, &activities)?;

        let next = streak::advance(&self.streak()?, today);
        self.write_slot(STREAK_SLOT, &next)
    }

    /// Replace the content of the first record matching `date`. Silent
    /// no-op when nothing matches.
    pub fn edit(&self, date: &str, new_content: &str) -> Result<(), StoreError> {
        let mut activities = self.list_all()?;
        if let Some(activity) = activities.iter_mut().find(|a| a.date == date) {
            activity.content = new_content.to_string();
            self.write_slot(ACTIVITIES_SLOT, &activities)?;
        }
        Ok(())
    }

    /// Remove every record matching `date`. Deleting the last remaining
    /// record clears the streak aggregate entirely; otherwise the aggregate
    /// is recomputed.
    pub fn delete(&self, date: &str) -> Result<(), StoreError> {
        self.delete_at(date, current_date())
    }

    pub(crate) fn delete_at(&self, date: &str, today: NaiveDate) -> Result<(), StoreError> {
        let mut activities = self.list_all()?;
        activities.retain(|a| a.date != date);
        self.write_slot(ACTIVITIES_SLOT, &activities)?;

        if activities.is_empty() {
            self.storage.remove(STREAK_SLOT)?;
        } else {
            let next = streak::advance(&self.streak()?, today);
            self.write_slot(STREAK_SLOT, &next)?;
        }
        Ok(())
    }

    /// First record matching `date`, if any
    pub fn get_by_date(&self, date: &str) -> Result<Option<Activity>, StoreError> {
        Ok(self.list_all()?.into_iter().find(|a| a.date == date))
    }

    /// Current streak aggregate; `{0, None}` when nothing (valid) is stored
    pub fn streak(&self) -> Result<Streak, StoreError> {
        Ok(self.streak_slot()?.value_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_date;

    fn store(mode: AppendMode) -> ActivityStore {
        ActivityStore::new(Storage::open_in_memory().expect("open storage"), mode)
    }

    fn activity(date: &str, content: &str) -> Activity {
        Activity::new(date.to_string(), content.to_string())
    }

    fn day(s: &str) -> NaiveDate {
        parse_date(s).expect("valid test date")
    }

    #[test]
    fn list_all_returns_appends_in_order() {
        let store = store(AppendMode::Insert);
        let today = day("2024-01-10");
        for date in ["2024-01-03", "2024-01-01", "2024-01-02"] {
            store.append_at(activity(date, "x"), today).expect("append");
        }

        let all = store.list_all().expect("list");
        let dates: Vec<&str> = all.iter().map(|a| a.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn insert_mode_keeps_duplicate_dates() {
        let store = store(AppendMode::Insert);
        let today = day("2024-01-10");
        store
            .append_at(activity("2024-01-01", "first"), today)
            .expect("append");
        store
            .append_at(activity("2024-01-01", "second"), today)
            .expect("append");

        let all = store.list_all().expect("list");
        assert_eq!(all.len(), 2);
        // get_by_date returns the first match
        assert_eq!(
            store
                .get_by_date("2024-01-01")
                .expect("get")
                .expect("present")
                .content,
            "first"
        );
    }

    #[test]
    fn upsert_mode_replaces_the_existing_record() {
        let store = store(AppendMode::Upsert);
        let today = day("2024-01-10");
        store
            .append_at(activity("2024-01-01", "first"), today)
            .expect("append");
        store
            .append_at(activity("2024-01-01", "second"), today)
            .expect("append");

        let all = store.list_all().expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "second");
    }

    #[test]
    fn edit_changes_only_the_first_match() {
        let store = store(AppendMode::Insert);
        let today = day("2024-01-10");
        store
            .append_at(activity("2024-01-01", "a"), today)
            .expect("append");
        store
            .append_at(activity("2024-01-01", "b"), today)
            .expect("append");

        store.edit("2024-01-01", "edited").expect("edit");

        let all = store.list_all().expect("list");
        assert_eq!(all[0].content, "edited");
        assert_eq!(all[1].content, "b");
        assert_eq!(all[0].date, "2024-01-01");
        assert!(all[0].completed);
    }

    #[test]
    fn edit_without_a_match_changes_nothing() {
        let store = store(AppendMode::Upsert);
        store
            .append_at(activity("2024-01-01", "a"), day("2024-01-01"))
            .expect("append");

        store.edit("2024-02-02", "edited").expect("edit");

        let all = store.list_all().expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "a");
    }

    #[test]
    fn delete_removes_every_match_and_nothing_else() {
        let store = store(AppendMode::Insert);
        let today = day("2024-01-10");
        store
            .append_at(activity("2024-01-01", "a"), today)
            .expect("append");
        store
            .append_at(activity("2024-01-02", "b"), today)
            .expect("append");
        store
            .append_at(activity("2024-01-01", "c"), today)
            .expect("append");

        store.delete_at("2024-01-01", today).expect("delete");

        let all = store.list_all().expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].date, "2024-01-02");
    }

    #[test]
    fn deleting_the_last_record_clears_the_streak() {
        let store = store(AppendMode::Upsert);
        let today = day("2024-01-10");
        store
            .append_at(activity("2024-01-10", "a"), today)
            .expect("append");
        assert_eq!(store.streak().expect("streak").count, 1);

        store.delete_at("2024-01-10", today).expect("delete");

        assert_eq!(store.streak().expect("streak"), Streak::default());
        assert_eq!(store.list_all().expect("list"), Vec::<Activity>::new());
    }

    #[test]
    fn deleting_with_records_left_recomputes_the_streak() {
        let store = store(AppendMode::Upsert);
        store
            .append_at(activity("2024-01-09", "a"), day("2024-01-09"))
            .expect("append");
        store
            .append_at(activity("2024-01-10", "b"), day("2024-01-10"))
            .expect("append");
        assert_eq!(store.streak().expect("streak").count, 2);

        // Today's record goes away but the aggregate still says "logged
        // today", so the recompute leaves it unchanged.
        store.delete_at("2024-01-10", day("2024-01-10")).expect("delete");
        let streak = store.streak().expect("streak");
        assert_eq!(streak.count, 2);
        assert_eq!(streak.last_activity_date.as_deref(), Some("2024-01-10"));
    }

    #[test]
    fn consecutive_days_build_a_streak_of_three() {
        let store = store(AppendMode::Upsert);
        for date in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            store.append_at(activity(date, "x"), day(date)).expect("append");
        }

        let streak = store.streak().expect("streak");
        assert_eq!(streak.count, 3);
        assert_eq!(streak.last_activity_date.as_deref(), Some("2024-01-03"));
    }

    #[test]
    fn skipping_days_resets_the_streak() {
        let store = store(AppendMode::Upsert);
        store
            .append_at(activity("2024-01-01", "x"), day("2024-01-01"))
            .expect("append");
        store
            .append_at(activity("2024-01-05", "x"), day("2024-01-05"))
            .expect("append");

        let streak = store.streak().expect("streak");
        assert_eq!(streak.count, 1);
        assert_eq!(streak.last_activity_date.as_deref(), Some("2024-01-05"));
    }

    #[test]
    fn malformed_activities_blob_reads_as_empty() {
        let storage = Storage::open_in_memory().expect("open storage");
        storage.write(ACTIVITIES_SLOT, "{ not json").expect("write");
        let store = ActivityStore::new(storage, AppendMode::Upsert);

        assert_eq!(
            store.activities_slot().expect("slot"),
            Slot::<Vec<Activity>>::Corrupt
        );
        assert_eq!(store.list_all().expect("list"), Vec::<Activity>::new());
    }

    #[test]
    fn activity_with_empty_content_invalidates_the_whole_blob() {
        let storage = Storage::open_in_memory().expect("open storage");
        storage
            .write(
                ACTIVITIES_SLOT,
                r#"[{"date":"2024-01-01","content":"ok"},{"date":"2024-01-02","content":""}]"#,
            )
            .expect("write");
        let store = ActivityStore::new(storage, AppendMode::Upsert);

        assert_eq!(store.list_all().expect("list"), Vec::<Activity>::new());
    }

    #[test]
    fn malformed_streak_blob_reads_as_default() {
        let storage = Storage::open_in_memory().expect("open storage");
        storage.write(STREAK_SLOT, "[3]").expect("write");
        let store = ActivityStore::new(storage, AppendMode::Upsert);

        assert_eq!(store.streak().expect("streak"), Streak::default());
    }

    #[test]
    fn streak_count_without_a_date_reads_as_default() {
        let storage = Storage::open_in_memory().expect("open storage");
        storage.write(STREAK_SLOT, r#"{"count":3}"#).expect("write");
        let store = ActivityStore::new(storage, AppendMode::Upsert);

        assert_eq!(store.streak_slot().expect("slot"), Slot::Corrupt);
        assert_eq!(store.streak().expect("streak"), Streak::default());
    }

    #[test]
    fn streak_date_without_a_count_reads_as_default() {
        let storage = Storage::open_in_memory().expect("open storage");
        storage
            .write(
                STREAK_SLOT,
                r#"{"count":0,"lastActivityDate":"2024-01-10"}"#,
            )
            .expect("write");
        let store = ActivityStore::new(storage, AppendMode::Upsert);

        assert_eq!(store.streak_slot().expect("slot"), Slot::Corrupt);
        assert_eq!(store.streak().expect("streak"), Streak::default());
    }

    #[test]
    fn missing_slots_read_as_defaults() {
        let store = store(AppendMode::Upsert);
        assert_eq!(store.list_all().expect("list"), Vec::<Activity>::new());
        assert_eq!(store.streak().expect("streak"), Streak::default());
        assert_eq!(store.get_by_date("2024-01-01").expect("get"), None);
    }

    #[test]
    fn persisted_activity_round_trips() {
        let store = store(AppendMode::Upsert);
        let mut logged = activity("2024-01-01", "wrote tests");
        logged.completed = false;
        store
            .append_at(logged.clone(), day("2024-01-01"))
            .expect("append");

        assert_eq!(
            store.get_by_date("2024-01-01").expect("get"),
            Some(logged)
        );
    }
}
