//! Working-day counting.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Returns true if `date` is a weekday that is not in `holidays`.
#[must_use]
pub fn is_working_day(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(&date)
}

/// Counts working days in the inclusive range `[start, end]`.
///
/// A day counts when it falls Monday to Friday and is absent from
/// `holidays`. The holiday set is expected to cover the whole range, which
/// may span several years. Returns 0 when `end < start`.
#[must_use]
pub fn count_working_days(start: NaiveDate, end: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> i32 {
    if end < start {
        return 0;
    }

    let count = start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_working_day(*day, holidays))
        .count();

    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    // Mon 14 Jul 2025 .. Fri 18 Jul 2025, 14th is Bastille Day
    #[case(date(2025, 7, 14), date(2025, 7, 18), 4)]
    // Full week including the weekend
    #[case(date(2025, 7, 21), date(2025, 7, 27), 5)]
    // Weekend only
    #[case(date(2025, 7, 19), date(2025, 7, 20), 0)]
    // Single weekday
    #[case(date(2025, 7, 15), date(2025, 7, 15), 1)]
    // Single holiday
    #[case(date(2025, 7, 14), date(2025, 7, 14), 0)]
    // Across the year boundary: Dec 25 2025 and Jan 1 2026 excluded
    #[case(date(2025, 12, 22), date(2026, 1, 2), 8)]
    fn test_count_working_days(
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] expected: i32,
    ) {
        let holidays: BTreeSet<NaiveDate> = [
            date(2025, 7, 14),
            date(2025, 12, 25),
            date(2026, 1, 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(count_working_days(start, end, &holidays), expected);
    }

    #[test]
    fn test_end_before_start_is_zero() {
        assert_eq!(
            count_working_days(date(2025, 7, 18), date(2025, 7, 14), &BTreeSet::new()),
            0
        );
    }

    #[test]
    fn test_is_working_day() {
        let holidays: BTreeSet<NaiveDate> = [date(2025, 5, 1)].into_iter().collect();
        assert!(is_working_day(date(2025, 5, 2), &holidays));
        assert!(!is_working_day(date(2025, 5, 1), &holidays));
        assert!(!is_working_day(date(2025, 5, 3), &holidays));
        assert!(!is_working_day(date(2025, 5, 4), &holidays));
    }
}
