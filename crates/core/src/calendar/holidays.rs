//! Fixed public-holiday list.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::calendar::easter::easter_sunday;
use crate::calendar::error::CalendarError;

/// A computed public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicHoliday {
    /// Calendar date of the holiday.
    pub date: NaiveDate,
    /// Human-readable label.
    pub label: &'static str,
}

const FIXED_HOLIDAYS: [(u32, u32, &str); 8] = [
    (1, 1, "New Year's Day"),
    (5, 1, "Labour Day"),
    (5, 8, "Victory in Europe Day"),
    (7, 14, "Bastille Day"),
    (8, 15, "Assumption Day"),
    (11, 1, "All Saints' Day"),
    (11, 11, "Armistice Day"),
    (12, 25, "Christmas Day"),
];

const EASTER_RELATIVE_HOLIDAYS: [(u64, &str); 3] = [
    (1, "Easter Monday"),
    (39, "Ascension Day"),
    (50, "Whit Monday"),
];

/// Returns the 11 public holidays of `year`, sorted by date.
///
/// Ascension can coincide with May 1 or May 8; both entries are kept, so
/// the list always has 11 items but may hold 10 distinct dates.
///
/// # Errors
///
/// Returns `CalendarError::UnsupportedYear` for years the Easter
/// computation does not cover.
pub fn holidays_for_year(year: i32) -> Result<Vec<PublicHoliday>, CalendarError> {
    let easter = easter_sunday(year)?;

    let mut holidays = Vec::with_capacity(FIXED_HOLIDAYS.len() + EASTER_RELATIVE_HOLIDAYS.len());

    for (month, day, label) in FIXED_HOLIDAYS {
        let date =
            NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::UnsupportedYear(year))?;
        holidays.push(PublicHoliday { date, label });
    }

    for (offset, label) in EASTER_RELATIVE_HOLIDAYS {
        let date = easter
            .checked_add_days(Days::new(offset))
            .ok_or(CalendarError::UnsupportedYear(year))?;
        holidays.push(PublicHoliday { date, label });
    }

    holidays.sort_by_key(|h| h.date);
    Ok(holidays)
}
