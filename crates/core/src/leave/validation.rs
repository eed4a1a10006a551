//! Input checks for leave submission and edits.

use chrono::NaiveDate;

use crate::leave::error::LeaveError;
use crate::leave::types::{DateRange, LeaveType};

/// Ensures `end >= start`.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange, LeaveError> {
    DateRange::new(start, end)
}

/// Ensures the employee may submit `leave_type` without HR.
pub fn require_selectable(leave_type: LeaveType) -> Result<(), LeaveError> {
    if leave_type.employee_selectable() {
        Ok(())
    } else {
        Err(LeaveError::LeaveTypeNotSelectable(leave_type))
    }
}

/// Ensures the range contains at least one working day.
pub fn require_working_days(range: &DateRange, working_days: i32) -> Result<(), LeaveError> {
    if working_days > 0 {
        Ok(())
    } else {
        Err(LeaveError::NoWorkingDays {
            start: range.start(),
            end: range.end(),
        })
    }
}

/// Returns the trimmed rejection reason, or `ReasonRequired` when blank.
pub fn require_reason(reason: &str) -> Result<String, LeaveError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(LeaveError::ReasonRequired);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_reason_trims() {
        assert_eq!(require_reason("  too busy  ").unwrap(), "too busy");
        assert!(matches!(require_reason("   "), Err(LeaveError::ReasonRequired)));
        assert!(matches!(require_reason(""), Err(LeaveError::ReasonRequired)));
    }

    #[test]
    fn test_require_selectable() {
        assert!(require_selectable(LeaveType::Rtt).is_ok());
        assert!(matches!(
            require_selectable(LeaveType::Sick),
            Err(LeaveError::LeaveTypeNotSelectable(LeaveType::Sick))
        ));
    }

    #[test]
    fn test_require_working_days() {
        let sat = NaiveDate::from_ymd_opt(2025, 7, 19).unwrap();
        let sun = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();
        let range = validate_range(sat, sun).unwrap();
        assert!(matches!(
            require_working_days(&range, 0),
            Err(LeaveError::NoWorkingDays { .. })
        ));
        assert!(require_working_days(&range, 1).is_ok());
    }
}
