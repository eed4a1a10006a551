//! Leave domain types.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use leavedesk_shared::types::{EmployeeId, LeaveRequestId};

use crate::leave::error::LeaveError;
use crate::leave::overlap::ranges_overlap;

/// Kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Paid leave, drawn from the yearly allocation.
    PaidLeave,
    /// Reduction of working time days.
    Rtt,
    /// Unpaid leave.
    Unpaid,
    /// Sick leave, recorded by HR.
    Sick,
    /// Seniority days, drawn from the yearly allocation.
    Seniority,
}

impl LeaveType {
    /// All leave types.
    pub const ALL: [Self; 5] = [
        Self::PaidLeave,
        Self::Rtt,
        Self::Unpaid,
        Self::Sick,
        Self::Seniority,
    ];

    /// Returns the string representation of the leave type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PaidLeave => "paid_leave",
            Self::Rtt => "rtt",
            Self::Unpaid => "unpaid",
            Self::Sick => "sick",
            Self::Seniority => "seniority",
        }
    }

    /// Human-readable label used in notifications and exports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PaidLeave => "Paid leave",
            Self::Rtt => "RTT",
            Self::Unpaid => "Unpaid leave",
            Self::Sick => "Sick leave",
            Self::Seniority => "Seniority leave",
        }
    }

    /// Returns true if approved requests of this type reduce the balance.
    #[must_use]
    pub const fn consumes_balance(&self) -> bool {
        matches!(self, Self::PaidLeave | Self::Seniority)
    }

    /// Returns true if an employee may submit this type themselves.
    #[must_use]
    pub const fn employee_selectable(&self) -> bool {
        matches!(self, Self::PaidLeave | Self::Rtt | Self::Unpaid)
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a persisted leave request.
///
/// Valid transitions:
/// - PendingManager → PendingHr (manager approves)
/// - PendingManager → Rejected (manager rejects)
/// - PendingHr → Approved (HR approves)
/// - PendingHr → Rejected (HR rejects)
/// - PendingManager / PendingHr → Cancelled (owner cancels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Waiting for the owner's manager.
    PendingManager,
    /// Waiting for HR.
    PendingHr,
    /// Approved by HR (terminal).
    Approved,
    /// Rejected by the manager or HR (terminal).
    Rejected,
    /// Cancelled by the owner (terminal).
    Cancelled,
}

impl LeaveStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingManager => "pending_manager",
            Self::PendingHr => "pending_hr",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true while the request awaits a decision.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::PendingManager | Self::PendingHr)
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive calendar date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LeaveError> {
        if end < start {
            return Err(LeaveError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` lies inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        ranges_overlap(self.start, self.end, other.start, other.end)
    }

    /// Returns true if `other` lies entirely within this range.
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Calendar years touched by the range.
    #[must_use]
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start.year()..=self.end.year()
    }
}

/// The subset of a persisted leave request the engine reasons about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Request identifier.
    pub id: LeaveRequestId,
    /// Owner of the request.
    pub employee_id: EmployeeId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Working days frozen at creation or last HR edit.
    pub working_days: i32,
    /// Leave type.
    pub leave_type: LeaveType,
    /// Current status.
    pub status: LeaveStatus,
}

impl LeaveRecord {
    /// Returns true if the request shares at least one day with
    /// `[start, end]`.
    #[must_use]
    pub fn intersects(&self, start: NaiveDate, end: NaiveDate) -> bool {
        ranges_overlap(self.start_date, self.end_date, start, end)
    }
}

/// An unpersisted leave submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDraft {
    /// Employee the leave is for.
    pub employee_id: EmployeeId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Leave type.
    pub leave_type: LeaveType,
    /// Free-text comment.
    pub comment: Option<String>,
}

impl LeaveDraft {
    /// Validates the dates and returns them as a range.
    pub fn range(&self) -> Result<DateRange, LeaveError> {
        DateRange::new(self.start_date, self.end_date)
    }
}
