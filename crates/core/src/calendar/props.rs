//! Property-based tests for the holiday calendar and working-day counter.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;

use super::easter::easter_sunday;
use super::holidays::holidays_for_year;
use super::working_days::count_working_days;

/// Strategy for years in a realistic operating window.
fn arb_year() -> impl Strategy<Value = i32> {
    1900i32..=2200i32
}

/// Strategy for a date between 2000 and 2099.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100i32, 1u32..=366u32).prop_map(|(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal)
            .or_else(|| NaiveDate::from_yo_opt(year, 365))
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every year yields exactly 11 holidays, all inside the year, sorted.
    #[test]
    fn prop_eleven_holidays_inside_year(year in arb_year()) {
        let holidays = holidays_for_year(year).unwrap();
        prop_assert_eq!(holidays.len(), 11);
        for h in &holidays {
            prop_assert_eq!(h.date.year(), year);
        }
        for pair in holidays.windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }
    }

    /// Easter is always a Sunday between March 22 and April 25.
    #[test]
    fn prop_easter_is_sunday_in_window(year in arb_year()) {
        let easter = easter_sunday(year).unwrap();
        prop_assert_eq!(easter.weekday(), chrono::Weekday::Sun);
        let earliest = NaiveDate::from_ymd_opt(year, 3, 22).unwrap();
        let latest = NaiveDate::from_ymd_opt(year, 4, 25).unwrap();
        prop_assert!(easter >= earliest && easter <= latest);
    }

    /// Easter-relative holidays sit at +1, +39 and +50 days.
    #[test]
    fn prop_easter_offsets(year in arb_year()) {
        let easter = easter_sunday(year).unwrap();
        let holidays = holidays_for_year(year).unwrap();
        let find = |label: &str| holidays.iter().find(|h| h.label == label).map(|h| h.date);

        prop_assert_eq!(find("Easter Monday"), easter.checked_add_days(Days::new(1)));
        prop_assert_eq!(find("Ascension Day"), easter.checked_add_days(Days::new(39)));
        prop_assert_eq!(find("Whit Monday"), easter.checked_add_days(Days::new(50)));
    }

    /// The count never exceeds the number of calendar days in the range.
    #[test]
    fn prop_working_days_bounded(start in arb_date(), span in 0u64..400u64) {
        let end = start.checked_add_days(Days::new(span)).unwrap();
        let mut holidays = BTreeSet::new();
        for year in start.year()..=end.year() {
            holidays.extend(holidays_for_year(year).unwrap().into_iter().map(|h| h.date));
        }

        let count = count_working_days(start, end, &holidays);
        prop_assert!(count >= 0);
        prop_assert!(i64::from(count) <= (end - start).num_days() + 1);
    }

    /// A single-day range counts as 0 or 1.
    #[test]
    fn prop_single_day_is_zero_or_one(day in arb_date()) {
        let holidays: BTreeSet<NaiveDate> = holidays_for_year(day.year())
            .unwrap()
            .into_iter()
            .map(|h| h.date)
            .collect();
        let count = count_working_days(day, day, &holidays);
        prop_assert!(count == 0 || count == 1);
    }

    /// Reversed ranges are empty.
    #[test]
    fn prop_reversed_range_is_zero(start in arb_date(), span in 1u64..100u64) {
        let end = start.checked_add_days(Days::new(span)).unwrap();
        prop_assert_eq!(count_working_days(end, start, &BTreeSet::new()), 0);
    }
}
