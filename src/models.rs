use serde::{Deserialize, Serialize};

/// One logged activity. At most one record per calendar date is the intended
/// shape, though the store only enforces that in upsert mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub date: String, // ISO 8601: YYYY-MM-DD
    pub content: String,
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

impl Activity {
    pub fn new(date: String, content: String) -> Self {
        Self {
            date,
            content,
            completed: true,
        }
    }
}

/// The single streak aggregate. `count == 0` exactly when no activity has
/// ever been logged (`last_activity_date` is None).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    #[serde(default)]
    pub count: u32,
    #[serde(rename = "lastActivityDate")]
    pub last_activity_date: Option<String>, // YYYY-MM-DD
}

impl Default for Streak {
    fn default() -> Self {
        Self {
            count: 0,
            last_activity_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_completed_defaults_to_true() {
        let activity: Activity =
            serde_json::from_str(r#"{"date":"2024-01-01","content":"ran 5k"}"#)
                .expect("valid activity JSON");
        assert!(activity.completed);
    }

    #[test]
    fn streak_uses_camel_case_date_field() {
        let streak = Streak {
            count: 3,
            last_activity_date: Some("2024-01-03".to_string()),
        };
        let json = serde_json::to_string(&streak).expect("serialize streak");
        assert!(json.contains("\"lastActivityDate\""));

        let back: Streak = serde_json::from_str(&json).expect("deserialize streak");
        assert_eq!(back, streak);
    }

    #[test]
    fn activity_round_trips() {
        let activity = Activity::new("2024-02-29".to_string(), "leap day".to_string());
        let json = serde_json::to_string(&activity).expect("serialize activity");
        let back: Activity = serde_json::from_str(&json).expect("deserialize activity");
        assert_eq!(back, activity);
    }
}
