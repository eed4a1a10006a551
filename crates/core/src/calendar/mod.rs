//! Public holiday calendar and working-day arithmetic.
//!
//! # Modules
//!
//! - `easter` - Easter Sunday computation (Meeus/Jones/Butcher)
//! - `holidays` - The fixed French public-holiday list for a year
//! - `working_days` - Working-day counting against a holiday set
//! - `error` - Calendar-specific error types

pub mod easter;
pub mod error;
pub mod holidays;
pub mod working_days;

#[cfg(test)]
mod props;

pub use easter::{FIRST_SUPPORTED_YEAR, LAST_SUPPORTED_YEAR, easter_sunday};
pub use error::CalendarError;
pub use holidays::{PublicHoliday, holidays_for_year};
pub use working_days::{count_working_days, is_working_day};
