use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::calendar::dates::sunday_on_or_before;
use crate::models::entry::Entry;

/// The weekdays a user has committed to writing on, indexed 0 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakDays([bool; 7]);

impl StreakDays {
    /// Build from weekday indices (0 = Sunday .. 6 = Saturday).
    /// Returns `None` if any index is out of range.
    pub fn from_indices(indices: &[u8]) -> Option<Self> {
        let mut days = [false; 7];
        for &i in indices {
            if i > 6 {
                return None;
            }
            days[i as usize] = true;
        }
        Some(Self(days))
    }

    /// Parse a comma-separated index list, e.g. `"1,2,3,4,5"`.
    pub fn from_csv(csv: &str) -> Option<Self> {
        let indices = csv
            .split(',')
            .map(|part| part.trim().parse::<u8>().ok())
            .collect::<Option<Vec<_>>>()?;
        Self::from_indices(&indices)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0[date.weekday().num_days_from_sunday() as usize]
    }
}

impl Default for StreakDays {
    /// Monday through Friday.
    fn default() -> Self {
        Self([false, true, true, true, true, true, false])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotStatus {
    Completed,
    Missed,
    Future,
    OptedOut,
}

/// One day's position in a rendered week. Borrows its entry from the
/// caller's list; rebuilt fresh on every computation.
#[derive(Debug, Serialize)]
pub struct DaySlot<'a> {
    pub date: NaiveDate,
    pub entry: Option<&'a Entry>,
    pub status: SlotStatus,
    pub is_streak_day: bool,
}

#[derive(Debug, Serialize)]
pub struct WeekView<'a> {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub label: String,
    pub slots: Vec<DaySlot<'a>>,
}

/// Produce the 7 day-slots for one week, Sunday through Saturday.
///
/// `week_start` defaults to the Sunday on or before `today`; a supplied
/// anchor is used as-is. Status rules:
/// - an entry on the date is `Completed`, streak day or not
/// - no entry and the date is past: `Missed` on streak days, else `OptedOut`
/// - no entry and the date is today or later: `Future` on streak days, else
///   `OptedOut` (today is not over, so it is never `Missed`)
pub fn build_week_view<'a>(
    entries: &'a [Entry],
    streak_days: StreakDays,
    week_start: Option<NaiveDate>,
    today: NaiveDate,
) -> WeekView<'a> {
    let start = week_start.unwrap_or_else(|| sunday_on_or_before(today));
    let end = start + Duration::days(6);

    let mut by_date: HashMap<NaiveDate, &Entry> = HashMap::with_capacity(entries.len());
    for entry in entries {
        if let Some(previous) = by_date.insert(entry.entry_date, entry) {
            // Schema forbids this; last one wins but it merits a warning.
            tracing::warn!(
                date = %entry.entry_date,
                kept = %entry.id,
                dropped = %previous.id,
                "Multiple entries share one date"
            );
        }
    }

    let slots = (0..7)
        .map(|i| {
            let date = start + Duration::days(i);
            let is_streak_day = streak_days.contains(date);
            let entry = by_date.get(&date).copied();
            let status = match entry {
                Some(_) => SlotStatus::Completed,
                None if !is_streak_day => SlotStatus::OptedOut,
                None if date < today => SlotStatus::Missed,
                None => SlotStatus::Future,
            };
            DaySlot {
                date,
                entry,
                status,
                is_streak_day,
            }
        })
        .collect();

    let label = if (start..=end).contains(&today) {
        "current".to_string()
    } else {
        format!(
            "{} – {}",
            start.format("%b %-d"),
            end.format("%b %-d, %Y")
        )
    };

    WeekView {
        week_start: start,
        week_end: end,
        label,
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn entry_on(date: &str) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            entry_date: date.parse().unwrap(),
            content: "wrote something".into(),
            created_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_week_has_seven_ascending_contiguous_slots() {
        let view = build_week_view(&[], StreakDays::default(), None, date("2024-01-10"));
        assert_eq!(view.slots.len(), 7);
        assert_eq!(view.week_start, date("2024-01-07")); // Sunday
        for (i, slot) in view.slots.iter().enumerate() {
            assert_eq!(slot.date, view.week_start + Duration::days(i as i64));
        }
        assert_eq!(view.week_end, date("2024-01-13"));
    }

    #[test]
    fn test_scenario_monday_entry_tuesday_missed_saturday_opted_out() {
        // Week of Sunday 2024-01-07, "today" is Wednesday the 10th.
        let entries = vec![entry_on("2024-01-08")];
        let view = build_week_view(
            &entries,
            StreakDays::default(),
            Some(date("2024-01-07")),
            date("2024-01-10"),
        );

        let monday = &view.slots[1];
        assert_eq!(monday.status, SlotStatus::Completed);
        assert!(monday.entry.is_some());

        let tuesday = &view.slots[2];
        assert_eq!(tuesday.status, SlotStatus::Missed);

        let saturday = &view.slots[6];
        assert_eq!(saturday.status, SlotStatus::OptedOut);
        assert!(!saturday.is_streak_day);
    }

    #[test]
    fn test_today_without_entry_is_future_not_missed() {
        let view = build_week_view(&[], StreakDays::default(), None, date("2024-01-10"));
        let today_slot = &view.slots[3]; // Wednesday
        assert_eq!(today_slot.date, date("2024-01-10"));
        assert_eq!(today_slot.status, SlotStatus::Future);
    }

    #[test]
    fn test_non_streak_day_is_opted_out_past_and_future() {
        // Only Mondays are streak days; Sunday the 7th (past) and Saturday
        // the 13th (future) must both come out opted-out.
        let streak = StreakDays::from_indices(&[1]).unwrap();
        let view = build_week_view(&[], streak, Some(date("2024-01-07")), date("2024-01-10"));
        assert_eq!(view.slots[0].status, SlotStatus::OptedOut);
        assert_eq!(view.slots[6].status, SlotStatus::OptedOut);
    }

    #[test]
    fn test_entry_on_non_streak_day_still_completed() {
        let entries = vec![entry_on("2024-01-13")]; // Saturday
        let view = build_week_view(
            &entries,
            StreakDays::default(),
            Some(date("2024-01-07")),
            date("2024-01-14"),
        );
        assert_eq!(view.slots[6].status, SlotStatus::Completed);
        assert!(!view.slots[6].is_streak_day);
    }

    #[test]
    fn test_duplicate_dates_last_wins_without_panic() {
        let first = entry_on("2024-01-08");
        let second = entry_on("2024-01-08");
        let second_id = second.id;
        let entries = vec![first, second];
        let view = build_week_view(
            &entries,
            StreakDays::default(),
            Some(date("2024-01-07")),
            date("2024-01-10"),
        );
        assert_eq!(view.slots[1].entry.unwrap().id, second_id);
    }

    #[test]
    fn test_label_current_vs_range() {
        let today = date("2024-01-10");
        let current = build_week_view(&[], StreakDays::default(), None, today);
        assert_eq!(current.label, "current");

        let past = build_week_view(
            &[],
            StreakDays::default(),
            Some(date("2023-12-31")),
            today,
        );
        assert_eq!(past.label, "Dec 31 – Jan 6, 2024");
    }

    #[test]
    fn test_streak_days_parsing() {
        assert_eq!(StreakDays::from_csv("1,2,3,4,5"), Some(StreakDays::default()));
        assert!(StreakDays::from_csv("0, 6").is_some());
        assert!(StreakDays::from_csv("7").is_none());
        assert!(StreakDays::from_csv("1,x").is_none());
    }

    #[test]
    fn test_default_streak_days_are_weekdays() {
        let streak = StreakDays::default();
        assert!(!streak.contains(date("2024-01-07"))); // Sunday
        assert!(streak.contains(date("2024-01-08"))); // Monday
        assert!(streak.contains(date("2024-01-12"))); // Friday
        assert!(!streak.contains(date("2024-01-13"))); // Saturday
    }
}
