use chrono::{Duration, NaiveDate};

use crate::calendar::dates::sunday_on_or_before;
use crate::calendar::week::{build_week_view, StreakDays, WeekView};
use crate::models::entry::Entry;

/// Minimum weeks of history shown once any entry exists.
const MIN_WEEKS_WITH_DATA: i64 = 4;

/// Stack week views back through history, most recent first.
///
/// With no entries only the current week is shown. Otherwise the window
/// reaches back to the oldest entry, with a floor of four weeks so new
/// users still see some history to fill in.
pub fn build_multi_week_view<'a>(
    entries: &'a [Entry],
    streak_days: StreakDays,
    today: NaiveDate,
) -> Vec<WeekView<'a>> {
    let current_week_start = sunday_on_or_before(today);

    let weeks = match entries.iter().map(|e| e.entry_date).min() {
        None => 1,
        Some(oldest) => {
            let days_back = (today - oldest).num_days().max(0);
            let weeks_span = (days_back + 6) / 7 + 1;
            weeks_span.max(MIN_WEEKS_WITH_DATA)
        }
    };

    (0..weeks)
        .map(|offset| {
            let week_start = current_week_start - Duration::days(offset * 7);
            build_week_view(entries, streak_days, Some(week_start), today)
        })
        .collect()
}
