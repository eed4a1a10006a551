//! Per-employee yearly entitlements.

use serde::{Deserialize, Serialize};

use leavedesk_shared::types::{AllocationId, EmployeeId, ExercisePeriodId};

use crate::leave::error::LeaveError;

/// Days granted to an employee for one exercise period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Allocation identifier.
    pub id: AllocationId,
    /// Employee the days belong to.
    pub employee_id: EmployeeId,
    /// Period the days apply to.
    pub period_id: ExercisePeriodId,
    /// The day counts.
    pub days: AllocationDays,
}

impl Allocation {
    /// Sum of all granted days.
    #[must_use]
    pub const fn total_days(&self) -> i32 {
        self.days.total()
    }
}

/// The three components of an entitlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationDays {
    /// Regular paid-leave days.
    pub days_allocated: i32,
    /// Seniority days.
    pub days_seniority: i32,
    /// Days carried over from the previous period.
    pub days_carry_over: i32,
}

impl AllocationDays {
    /// Sum of the three components.
    #[must_use]
    pub const fn total(&self) -> i32 {
        self.days_allocated + self.days_seniority + self.days_carry_over
    }
}

/// An HR edit of an allocation. Omitted fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationUpdate {
    /// Regular days; defaults to the period's default allocation.
    pub days_allocated: Option<i32>,
    /// Seniority days; defaults to 0.
    pub days_seniority: Option<i32>,
    /// Carry-over days; defaults to 0.
    pub days_carry_over: Option<i32>,
}

impl AllocationUpdate {
    /// Fills omitted fields and rejects negative values.
    pub fn resolve(&self, period_default: i32) -> Result<AllocationDays, LeaveError> {
        let days = AllocationDays {
            days_allocated: self.days_allocated.unwrap_or(period_default),
            days_seniority: self.days_seniority.unwrap_or(0),
            days_carry_over: self.days_carry_over.unwrap_or(0),
        };

        for (field, value) in [
            ("days_allocated", days.days_allocated),
            ("days_seniority", days.days_seniority),
            ("days_carry_over", days.days_carry_over),
        ] {
            if value < 0 {
                return Err(LeaveError::NegativeAllocation { field, value });
            }
        }

        Ok(days)
    }
}
