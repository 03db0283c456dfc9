use chrono::NaiveDate;

use crate::models::Streak;
use crate::utils::parse_date;

/// Compute the next streak aggregate after an activity is logged.
///
/// The comparison is always against the wall-clock calendar date at the
/// moment of the update, never against the date the activity was logged for.
/// Backfilling a past date therefore counts like logging today.
pub fn advance(prev: &Streak, today: NaiveDate) -> Streak {
    let today_str = today.format("%Y-%m-%d").to_string();

    let last = match prev.last_activity_date.as_deref() {
        Some(s) => s,
        None => {
            // First activity ever
            return Streak {
                count: 1,
                last_activity_date: Some(today_str),
            };
        }
    };

    // An unparseable stored date can never equal today or yesterday, so it
    // falls through to the reset branch.
    let last_date = parse_date(last).ok();
    let yesterday = today - chrono::Duration::days(1);

    if last_date == Some(today) {
        // Already logged today, streak stays the same
        prev.clone()
    } else if last_date == Some(yesterday) {
        Streak {
            count: prev.count + 1,
            last_activity_date: Some(today_str),
        }
    } else {
        // Streak broken (gap of two or more days, or a future date)
        Streak {
            count: 1,
            last_activity_date: Some(today_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).expect("valid test date")
    }

    fn streak(count: u32, last: Option<&str>) -> Streak {
        Streak {
            count,
            last_activity_date: last.map(|s| s.to_string()),
        }
    }

    #[test]
    fn first_activity_starts_a_streak() {
        let today = date("2024-03-10");
        let next = advance(&Streak::default(), today);
        assert_eq!(next, streak(1, Some("2024-03-10")));
    }

    #[test]
    fn logging_again_on_the_same_day_keeps_the_count() {
        let today = date("2024-03-10");
        let next = advance(&streak(4, Some("2024-03-10")), today);
        assert_eq!(next, streak(4, Some("2024-03-10")));
    }

    #[test]
    fn logging_the_day_after_extends_the_streak() {
        let today = date("2024-03-10");
        let next = advance(&streak(4, Some("2024-03-09")), today);
        assert_eq!(next, streak(5, Some("2024-03-10")));
    }

    #[test]
    fn a_gap_resets_to_one() {
        let today = date("2024-03-10");
        let next = advance(&streak(9, Some("2024-03-05")), today);
        assert_eq!(next, streak(1, Some("2024-03-10")));
    }

    #[test]
    fn a_future_last_date_resets_to_one() {
        let today = date("2024-03-10");
        let next = advance(&streak(2, Some("2024-03-11")), today);
        assert_eq!(next, streak(1, Some("2024-03-10")));
    }

    #[test]
    fn garbage_last_date_resets_to_one() {
        let today = date("2024-03-10");
        let next = advance(&streak(7, Some("not-a-date")), today);
        assert_eq!(next, streak(1, Some("2024-03-10")));
    }

    #[test]
    fn extends_across_a_month_boundary() {
        let today = date("2024-03-01");
        let next = advance(&streak(3, Some("2024-02-29")), today);
        assert_eq!(next, streak(4, Some("2024-03-01")));
    }

    #[test]
    fn three_consecutive_days_count_to_three() {
        let mut s = Streak::default();
        for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            s = advance(&s, date(day));
        }
        assert_eq!(s, streak(3, Some("2024-01-03")));
    }

    #[test]
    fn skipping_days_restarts_the_count() {
        let mut s = Streak::default();
        s = advance(&s, date("2024-01-01"));
        s = advance(&s, date("2024-01-05"));
        assert_eq!(s, streak(1, Some("2024-01-05")));
    }
}
