//! Overlap detection.
//!
//! Two ranges overlap when `a.start <= b.end && a.end >= b.start`. Status is
//! not considered: rejected and cancelled requests still block new ones on
//! the same days.

use chrono::NaiveDate;

/// Returns true if the inclusive ranges share at least one day.
#[must_use]
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leave::types::{DateRange, LeaveRecord, LeaveStatus, LeaveType};
    use leavedesk_shared::types::{EmployeeId, LeaveRequestId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_touching_ranges_overlap() {
        assert!(ranges_overlap(
            date(2025, 7, 14),
            date(2025, 7, 18),
            date(2025, 7, 18),
            date(2025, 7, 25)
        ));
        assert!(!ranges_overlap(
            date(2025, 7, 14),
            date(2025, 7, 18),
            date(2025, 7, 19),
            date(2025, 7, 25)
        ));
    }

    #[test]
    fn test_single_day_ranges() {
        let day = date(2025, 7, 14);
        assert!(ranges_overlap(day, day, day, day));
        assert!(!ranges_overlap(day, day, date(2025, 7, 15), date(2025, 7, 15)));
    }

    #[test]
    fn test_record_and_range_agree() {
        let record = LeaveRecord {
            id: LeaveRequestId::new(),
            employee_id: EmployeeId::new(),
            start_date: date(2025, 7, 14),
            end_date: date(2025, 7, 18),
            working_days: 4,
            leave_type: LeaveType::PaidLeave,
            status: LeaveStatus::Cancelled,
        };
        let stored = DateRange::new(record.start_date, record.end_date).unwrap();
        let query = DateRange::new(date(2025, 7, 16), date(2025, 7, 17)).unwrap();

        assert!(record.intersects(query.start(), query.end()));
        assert!(stored.overlaps(&query));
    }
}
