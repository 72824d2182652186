//! Local-date utility. Calendar days here are `NaiveDate` — a plain
//! year/month/day with no attached instant — so a parsed `YYYY-MM-DD`
//! can never shift by a day, whatever the host's UTC offset. The only
//! place a timezone enters is deciding what "today" is.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, Utc};

/// Today as seen on the server's local wall clock.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's date as a `YYYY-MM-DD` string, local wall-clock.
pub fn today_local_date_string() -> String {
    today_local().format("%Y-%m-%d").to_string()
}

/// Today as seen from an arbitrary UTC offset.
pub fn today_in(offset: FixedOffset) -> NaiveDate {
    local_date_at(Utc::now(), offset)
}

/// Today on the caller's wall clock, given their offset east of UTC in
/// minutes (the sign convention browsers use, negated). Falls back to
/// the server's local date when absent or out of range.
pub fn today_for_offset_minutes(minutes: Option<i32>) -> NaiveDate {
    match minutes
        .and_then(|m| m.checked_mul(60))
        .and_then(FixedOffset::east_opt)
    {
        Some(offset) => today_in(offset),
        None => today_local(),
    }
}

/// The calendar date a given instant falls on in the given offset.
pub fn local_date_at(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Strict `YYYY-MM-DD` parse. Never routes through an epoch conversion,
/// so the components read back exactly as written.
pub fn parse_local_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Long-form date for display, e.g. "Monday, January 8, 2024".
pub fn format_for_display(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// The Sunday on or before `date`.
pub fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    #[test]
    fn test_parse_round_trips() {
        for s in ["2024-01-08", "1999-12-31", "2024-02-29", "2000-01-01"] {
            let parsed = parse_local_date(s).expect("valid date should parse");
            assert_eq!(parsed.format("%Y-%m-%d").to_string(), s);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for s in ["2024-13-01", "2024-02-30", "01/08/2024", "2024-1-8x", ""] {
            assert!(parse_local_date(s).is_none(), "{s:?} should not parse");
        }
    }

    #[test]
    fn test_local_date_at_across_offsets() {
        // 01:00 UTC on June 15th.
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 1, 0, 0).unwrap();

        let utc_minus_12 = FixedOffset::west_opt(12 * 3600).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let india = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let utc_plus_14 = FixedOffset::east_opt(14 * 3600).unwrap();

        assert_eq!(
            local_date_at(instant, utc_minus_12),
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
        );
        assert_eq!(
            local_date_at(instant, utc),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
        assert_eq!(
            local_date_at(instant, india),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
        assert_eq!(
            local_date_at(instant, utc_plus_14),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_offset_never_shifts_parsed_dates() {
        // The parse path is offset-free: whatever "today" is anywhere on
        // Earth, a stored date string reads back unchanged.
        for offset_secs in [-12 * 3600, 0, 5 * 3600 + 1800, 14 * 3600] {
            let offset = FixedOffset::east_opt(offset_secs).unwrap();
            let _today = today_in(offset);
            let parsed = parse_local_date("2024-01-08").unwrap();
            assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2024-01-08");
        }
    }

    #[test]
    fn test_today_for_offset_minutes_rejects_out_of_range() {
        // ±24h of offset is not a real timezone; fall back to server-local.
        assert_eq!(today_for_offset_minutes(Some(24 * 60 + 1)), today_local());
        assert_eq!(today_for_offset_minutes(None), today_local());
    }

    #[test]
    fn test_today_local_date_string_shape() {
        let s = today_local_date_string();
        assert_eq!(s.len(), 10);
        assert!(parse_local_date(&s).is_some());
    }

    #[test]
    fn test_format_for_display() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(format_for_display(d), "Monday, January 8, 2024");
    }

    #[test]
    fn test_sunday_on_or_before() {
        // 2024-01-10 is a Wednesday.
        let wed = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let sunday = sunday_on_or_before(wed);
        assert_eq!(sunday, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(sunday.weekday(), Weekday::Sun);
        // A Sunday maps to itself.
        assert_eq!(sunday_on_or_before(sunday), sunday);
    }
}
