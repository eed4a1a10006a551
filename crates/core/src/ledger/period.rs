//! Annual exercise periods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use leavedesk_shared::types::ExercisePeriodId;

use crate::leave::error::LeaveError;

/// The window over which allocations and consumption are counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisePeriod {
    /// Period identifier.
    pub id: ExercisePeriodId,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
    /// Paid-leave days granted when an allocation is first edited.
    pub default_allocated_days: i32,
    /// Whether this is the active period.
    pub is_active: bool,
}

impl ExercisePeriod {
    /// Returns true if `[start, end]` lies entirely within the period.
    #[must_use]
    pub fn contains_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= start && end <= self.end_date
    }

    /// Returns true if `date` falls within the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Calendar years the period spans.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        (self.start_date.year()..=self.end_date.year()).collect()
    }
}

/// Checks period dates and default allocation before a write.
pub fn validate_period(
    start: NaiveDate,
    end: NaiveDate,
    default_allocated_days: i32,
) -> Result<(), LeaveError> {
    if end <= start {
        return Err(LeaveError::InvalidPeriod { start, end });
    }
    if default_allocated_days < 0 {
        return Err(LeaveError::NegativeAllocation {
            field: "default_allocated_days",
            value: default_allocated_days,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period() -> ExercisePeriod {
        ExercisePeriod {
            id: ExercisePeriodId::new(),
            start_date: date(2025, 6, 1),
            end_date: date(2026, 5, 31),
            default_allocated_days: 25,
            is_active: true,
        }
    }

    #[test]
    fn test_contains_range_is_inclusive() {
        let p = period();
        assert!(p.contains_range(date(2025, 6, 1), date(2026, 5, 31)));
        assert!(!p.contains_range(date(2025, 5, 30), date(2025, 6, 2)));
        assert!(!p.contains_range(date(2026, 5, 29), date(2026, 6, 1)));
    }

    #[test]
    fn test_years_spanned() {
        assert_eq!(period().years(), vec![2025, 2026]);
    }

    #[test]
    fn test_validate_period() {
        assert!(validate_period(date(2025, 1, 1), date(2025, 12, 31), 25).is_ok());
        assert!(matches!(
            validate_period(date(2025, 1, 1), date(2025, 1, 1), 25),
            Err(LeaveError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            validate_period(date(2025, 1, 1), date(2025, 12, 31), -1),
            Err(LeaveError::NegativeAllocation { .. })
        ));
    }
}
