//! Calendar error types.

use thiserror::Error;

/// Errors raised by holiday computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The Easter algorithm is only defined for Gregorian years.
    #[error("Year {0} is outside the supported Gregorian range")]
    UnsupportedYear(i32),
}
