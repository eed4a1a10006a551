//! Yearly aggregation of approved leave.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::leave::types::{LeaveRecord, LeaveStatus};

/// Approved leave taken in one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearSummary {
    /// Year of the request start dates.
    pub year: i32,
    /// Number of approved requests.
    pub request_count: usize,
    /// Sum of their working days.
    pub total_days: i32,
}

/// Groups approved records by start year, most recent year first.
#[must_use]
pub fn summarize_by_year(records: &[LeaveRecord]) -> Vec<YearSummary> {
    let mut by_year: BTreeMap<i32, (usize, i32)> = BTreeMap::new();

    for record in records
        .iter()
        .filter(|r| r.status == LeaveStatus::Approved)
    {
        let entry = by_year.entry(record.start_date.year()).or_default();
        entry.0 += 1;
        entry.1 += record.working_days;
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, (request_count, total_days))| YearSummary {
            year,
            request_count,
            total_days,
        })
        .collect()
}
