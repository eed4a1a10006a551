//! Property-based tests for overlap detection.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use leavedesk_shared::types::{EmployeeId, LeaveRequestId};

use super::overlap::ranges_overlap;
use super::types::{LeaveRecord, LeaveStatus, LeaveType};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Strategy for a (start offset, length) pair within 2025.
fn arb_span() -> impl Strategy<Value = (u64, u64)> {
    (0u64..330u64, 0u64..30u64)
}

/// Shorter spans clustered together so overlaps are common.
fn arb_short_span() -> impl Strategy<Value = (u64, u64)> {
    (0u64..40u64, 0u64..10u64)
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

fn to_range((offset, len): (u64, u64)) -> (NaiveDate, NaiveDate) {
    let start = base().checked_add_days(Days::new(offset)).unwrap();
    let end = start.checked_add_days(Days::new(len)).unwrap();
    (start, end)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Overlap is symmetric.
    #[test]
    fn prop_overlap_symmetric(a in arb_span(), b in arb_span()) {
        let (a_start, a_end) = to_range(a);
        let (b_start, b_end) = to_range(b);
        prop_assert_eq!(
            ranges_overlap(a_start, a_end, b_start, b_end),
            ranges_overlap(b_start, b_end, a_start, a_end)
        );
    }

    /// Ranges overlap exactly when some day lies in both.
    #[test]
    fn prop_overlap_iff_shared_day(a in arb_short_span(), b in arb_short_span()) {
        let (a_start, a_end) = to_range(a);
        let (b_start, b_end) = to_range(b);
        let shared = a_start
            .iter_days()
            .take_while(|d| *d <= a_end)
            .any(|d| b_start <= d && d <= b_end);
        prop_assert_eq!(ranges_overlap(a_start, a_end, b_start, b_end), shared);
    }

    /// A stored record intersects a query range whatever its status.
    #[test]
    fn prop_record_intersects_regardless_of_status(
        span in arb_span(),
        status in arb_status(),
        query in arb_span(),
    ) {
        let (start_date, end_date) = to_range(span);
        let record = LeaveRecord {
            id: LeaveRequestId::new(),
            employee_id: EmployeeId::new(),
            start_date,
            end_date,
            working_days: 1,
            leave_type: LeaveType::PaidLeave,
            status,
        };
        let (start, end) = to_range(query);
        prop_assert_eq!(
            record.intersects(start, end),
            ranges_overlap(start_date, end_date, start, end)
        );
    }
}
