//! Property-based tests for balance arithmetic.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use leavedesk_shared::types::{EmployeeId, ExercisePeriodId, LeaveRequestId};

use super::allocation::AllocationDays;
use super::balance::{BalanceCheck, compute_balance, has_sufficient_balance};
use super::period::ExercisePeriod;
use crate::leave::types::{LeaveRecord, LeaveStatus, LeaveType};

fn period() -> ExercisePeriod {
    ExercisePeriod {
        id: ExercisePeriodId::new(),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        default_allocated_days: 25,
        is_active: true,
    }
}

fn arb_allocation() -> impl Strategy<Value = AllocationDays> {
    (0i32..40, 0i32..10, 0i32..10).prop_map(|(a, s, c)| AllocationDays {
        days_allocated: a,
        days_seniority: s,
        days_carry_over: c,
    })
}

fn arb_type() -> impl Strategy<Value = LeaveType> {
    prop::sample::select(LeaveType::ALL.to_vec())
}

fn arb_status() -> impl Strategy<Value = LeaveStatus> {
    prop_oneof![
        Just(LeaveStatus::PendingManager),
        Just(LeaveStatus::PendingHr),
        Just(LeaveStatus::Approved),
        Just(LeaveStatus::Rejected),
        Just(LeaveStatus::Cancelled),
    ]
}

fn arb_record() -> impl Strategy<Value = LeaveRecord> {
    (0u64..360, 0u64..10, 1i32..8, arb_type(), arb_status()).prop_map(
        |(offset, len, days, leave_type, status)| {
            let start = NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .checked_add_days(Days::new(offset))
                .unwrap();
            LeaveRecord {
                id: LeaveRequestId::new(),
                employee_id: EmployeeId::new(),
                start_date: start,
                end_date: start.checked_add_days(Days::new(len)).unwrap(),
                working_days: days,
                leave_type,
                status,
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// remaining = total_allocated - consumed, with no clamping.
    #[test]
    fn prop_remaining_identity(
        allocation in arb_allocation(),
        records in prop::collection::vec(arb_record(), 0..20),
    ) {
        let balance = compute_balance(Some(&allocation), &records, Some(&period()));
        prop_assert_eq!(balance.total_allocated, allocation.total());
        prop_assert_eq!(balance.remaining, balance.total_allocated - balance.consumed);
        prop_assert!(balance.consumed >= 0);
    }

    /// Non-consuming or non-approved records never change the balance.
    #[test]
    fn prop_non_counting_records_are_ignored(
        allocation in arb_allocation(),
        records in prop::collection::vec(arb_record(), 0..20),
    ) {
        let counted: Vec<LeaveRecord> = records
            .iter()
            .filter(|r| r.status == LeaveStatus::Approved && r.leave_type.consumes_balance())
            .cloned()
            .collect();
        let all = compute_balance(Some(&allocation), &records, Some(&period()));
        let only_counted = compute_balance(Some(&allocation), &counted, Some(&period()));
        prop_assert_eq!(all, only_counted);
    }

    /// Sufficiency holds exactly when remaining >= requested.
    #[test]
    fn prop_sufficiency_rule(remaining in -50i32..50, requested in 0i32..50) {
        let check = BalanceCheck { remaining, requested };
        prop_assert_eq!(check.is_sufficient(), remaining >= requested);
        prop_assert_eq!(has_sufficient_balance(remaining, requested), remaining >= requested);
        prop_assert_eq!(check.ensure().is_ok(), remaining >= requested);
    }
}
