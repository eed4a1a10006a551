//! Easter Sunday computation.

use chrono::NaiveDate;

use crate::calendar::error::CalendarError;

/// First year of the Gregorian computus.
pub const FIRST_SUPPORTED_YEAR: i32 = 1583;
/// Last four-digit year.
pub const LAST_SUPPORTED_YEAR: i32 = 9999;

/// Computes Easter Sunday with the anonymous Gregorian algorithm
/// (Meeus/Jones/Butcher).
///
/// # Errors
///
/// Returns `CalendarError::UnsupportedYear` outside
/// [`FIRST_SUPPORTED_YEAR`]..=[`LAST_SUPPORTED_YEAR`].
pub fn easter_sunday(year: i32) -> Result<NaiveDate, CalendarError> {
    if !(FIRST_SUPPORTED_YEAR..=LAST_SUPPORTED_YEAR).contains(&year) {
        return Err(CalendarError::UnsupportedYear(year));
    }

    // All intermediate values are non-negative for positive years, so
    // truncating division matches floor division here.
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    let month = u32::try_from(month).map_err(|_| CalendarError::UnsupportedYear(year))?;
    let day = u32::try_from(day).map_err(|_| CalendarError::UnsupportedYear(year))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::UnsupportedYear(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1583, 4, 10)]
    #[case(1818, 3, 22)]
    #[case(2000, 4, 23)]
    #[case(2019, 4, 21)]
    #[case(2024, 3, 31)]
    #[case(2025, 4, 20)]
    #[case(2026, 4, 5)]
    #[case(2038, 4, 25)]
    #[case(9999, 3, 28)]
    fn test_known_easter_dates(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
        assert_eq!(
            easter_sunday(year).unwrap(),
            NaiveDate::from_ymd_opt(year, month, day).unwrap()
        );
    }

    #[rstest]
    #[case(1582)]
    #[case(0)]
    #[case(-44)]
    #[case(10_000)]
    fn test_unsupported_years(#[case] year: i32) {
        assert_eq!(
            easter_sunday(year),
            Err(CalendarError::UnsupportedYear(year))
        );
    }
}
