//! Derived leave balances.
//!
//! Consumption is never stored. It is recomputed from approved requests of a
//! balance-consuming type that lie entirely inside the period.

use serde::{Deserialize, Serialize};

use crate::leave::error::LeaveError;
use crate::leave::types::{LeaveRecord, LeaveStatus};
use crate::ledger::allocation::AllocationDays;
use crate::ledger::period::ExercisePeriod;

/// Balance snapshot for one employee and one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Sum of the allocation components.
    pub total_allocated: i32,
    /// Regular paid-leave days.
    pub days_allocated: i32,
    /// Seniority days.
    pub days_seniority: i32,
    /// Carry-over days.
    pub days_carry_over: i32,
    /// Working days of approved consuming leave in the period.
    pub consumed: i32,
    /// `total_allocated - consumed`, may be negative.
    pub remaining: i32,
}

impl Balance {
    /// Builds a balance from an optional allocation and a consumed count.
    #[must_use]
    pub fn new(allocation: Option<&AllocationDays>, consumed: i32) -> Self {
        let days = allocation.copied().unwrap_or_default();
        let total_allocated = days.total();
        Self {
            total_allocated,
            days_allocated: days.days_allocated,
            days_seniority: days.days_seniority,
            days_carry_over: days.days_carry_over,
            consumed,
            remaining: total_allocated - consumed,
        }
    }

    /// The balance when no period is configured.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Remaining days with `excluded` added back if it is already approved.
    ///
    /// Used when re-checking a request against its own balance. Any approved
    /// request is added back, whatever its type or dates.
    #[must_use]
    pub fn remaining_excluding(&self, excluded: Option<&LeaveRecord>) -> i32 {
        match excluded {
            Some(record) if record.status == LeaveStatus::Approved => {
                self.remaining + record.working_days
            }
            _ => self.remaining,
        }
    }
}

/// Remaining versus requested days for a single sufficiency decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceCheck {
    /// Days remaining after any exclusion.
    pub remaining: i32,
    /// Days the request needs.
    pub requested: i32,
}

impl BalanceCheck {
    /// Returns true if `remaining >= requested`.
    #[must_use]
    pub const fn is_sufficient(&self) -> bool {
        has_sufficient_balance(self.remaining, self.requested)
    }

    /// Fails with `InsufficientBalance` when the check does not pass.
    pub fn ensure(&self) -> Result<(), LeaveError> {
        if self.is_sufficient() {
            Ok(())
        } else {
            Err(LeaveError::InsufficientBalance {
                remaining: self.remaining,
                requested: self.requested,
            })
        }
    }
}

/// Returns true for an approved record of a consuming type.
fn counts_toward_consumption(record: &LeaveRecord) -> bool {
    record.status == LeaveStatus::Approved && record.leave_type.consumes_balance()
}

/// Sums the working days of approved consuming records inside `period`.
#[must_use]
pub fn consumed_days(records: &[LeaveRecord], period: &ExercisePeriod) -> i32 {
    records
        .iter()
        .filter(|r| counts_toward_consumption(r))
        .filter(|r| period.contains_range(r.start_date, r.end_date))
        .map(|r| r.working_days)
        .sum()
}

/// Computes a balance snapshot. Without a period the balance is zero.
#[must_use]
pub fn compute_balance(
    allocation: Option<&AllocationDays>,
    records: &[LeaveRecord],
    period: Option<&ExercisePeriod>,
) -> Balance {
    match period {
        Some(period) => Balance::new(allocation, consumed_days(records, period)),
        None => Balance::zero(),
    }
}

/// Sufficiency rule: `remaining >= requested`.
#[must_use]
pub const fn has_sufficient_balance(remaining: i32, requested: i32) -> bool {
    remaining >= requested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leave::types::LeaveType;
    use chrono::NaiveDate;
    use leavedesk_shared::types::{EmployeeId, ExercisePeriodId, LeaveRequestId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period() -> ExercisePeriod {
        ExercisePeriod {
            id: ExercisePeriodId::new(),
            start_date: date(2025, 1, 1),
            end_date: date(2025, 12, 31),
            default_allocated_days: 25,
            is_active: true,
        }
    }

    fn record(
        start: NaiveDate,
        end: NaiveDate,
        days: i32,
        leave_type: LeaveType,
        status: LeaveStatus,
    ) -> LeaveRecord {
        LeaveRecord {
            id: LeaveRequestId::new(),
            employee_id: EmployeeId::new(),
            start_date: start,
            end_date: end,
            working_days: days,
            leave_type,
            status,
        }
    }

    #[test]
    fn test_consumed_counts_only_approved_consuming_inside_period() {
        let records = vec![
            record(date(2025, 7, 14), date(2025, 7, 18), 4, LeaveType::PaidLeave, LeaveStatus::Approved),
            record(date(2025, 8, 4), date(2025, 8, 5), 2, LeaveType::Seniority, LeaveStatus::Approved),
            record(date(2025, 9, 1), date(2025, 9, 1), 1, LeaveType::Rtt, LeaveStatus::Approved),
            record(date(2025, 10, 1), date(2025, 10, 3), 3, LeaveType::PaidLeave, LeaveStatus::PendingHr),
            // Straddles the period end
            record(date(2025, 12, 29), date(2026, 1, 2), 4, LeaveType::PaidLeave, LeaveStatus::Approved),
        ];

        assert_eq!(consumed_days(&records, &period()), 6);
    }

    #[test]
    fn test_balance_without_allocation_goes_negative() {
        let records = vec![record(
            date(2025, 7, 15),
            date(2025, 7, 16),
            2,
            LeaveType::PaidLeave,
            LeaveStatus::Approved,
        )];
        let balance = compute_balance(None, &records, Some(&period()));
        assert_eq!(balance.total_allocated, 0);
        assert_eq!(balance.consumed, 2);
        assert_eq!(balance.remaining, -2);
    }

    #[test]
    fn test_no_period_is_zero() {
        let days = AllocationDays {
            days_allocated: 25,
            ..AllocationDays::default()
        };
        assert_eq!(compute_balance(Some(&days), &[], None), Balance::zero());
    }

    #[test]
    fn test_remaining_excluding_adds_back_approved_only() {
        let days = AllocationDays {
            days_allocated: 25,
            ..AllocationDays::default()
        };
        let approved = record(date(2025, 7, 15), date(2025, 7, 18), 4, LeaveType::PaidLeave, LeaveStatus::Approved);
        let pending = record(date(2025, 8, 4), date(2025, 8, 6), 3, LeaveType::PaidLeave, LeaveStatus::PendingHr);
        let balance = compute_balance(Some(&days), &[approved.clone(), pending.clone()], Some(&period()));

        assert_eq!(balance.remaining, 21);
        assert_eq!(balance.remaining_excluding(Some(&approved)), 25);
        assert_eq!(balance.remaining_excluding(Some(&pending)), 21);
        assert_eq!(balance.remaining_excluding(None), 21);
    }

    #[test]
    fn test_remaining_excluding_ignores_type_and_period() {
        let days = AllocationDays {
            days_allocated: 25,
            ..AllocationDays::default()
        };
        let balance = compute_balance(Some(&days), &[], Some(&period()));
        let rtt = record(date(2025, 3, 3), date(2025, 3, 7), 5, LeaveType::Rtt, LeaveStatus::Approved);
        let last_year = record(date(2024, 3, 4), date(2024, 3, 8), 5, LeaveType::PaidLeave, LeaveStatus::Approved);

        assert_eq!(balance.remaining_excluding(Some(&rtt)), 30);
        assert_eq!(balance.remaining_excluding(Some(&last_year)), 30);
    }

    #[test]
    fn test_balance_check() {
        assert!(BalanceCheck { remaining: 3, requested: 3 }.ensure().is_ok());
        assert!(matches!(
            BalanceCheck { remaining: 2, requested: 3 }.ensure(),
            Err(LeaveError::InsufficientBalance { remaining: 2, requested: 3 })
        ));
    }
}
