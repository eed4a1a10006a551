//! Leave engine error types.
//!
//! Every failure of the engine is a `LeaveError`. `LeaveError::kind()`
//! groups variants into the outcome classes callers branch on.

use chrono::NaiveDate;
use thiserror::Error;

use leavedesk_shared::AppError;
use leavedesk_shared::types::{EmployeeId, ExercisePeriodId, HolidayId, LeaveRequestId};

use crate::calendar::CalendarError;
use crate::leave::types::{LeaveStatus, LeaveType};
use crate::workflow::types::LeaveAction;

/// Outcome classes of a `LeaveError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveErrorKind {
    /// Malformed or disallowed input.
    Validation,
    /// Clash with existing data.
    Conflict,
    /// Not enough remaining leave days.
    InsufficientBalance,
    /// The request's state or the actor does not allow the action.
    InvalidStateTransition,
    /// A referenced entity does not exist.
    NotFound,
    /// Storage failure.
    Infrastructure,
}

/// Errors produced by the leave engine.
#[derive(Debug, Error)]
pub enum LeaveError {
    /// End date precedes start date.
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },

    /// The range contains only weekends and holidays.
    #[error("No working days between {start} and {end}")]
    NoWorkingDays {
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },

    /// A rejection was attempted without a reason.
    #[error("Rejection reason is required")]
    ReasonRequired,

    /// Employees cannot self-submit this leave type.
    #[error("Leave type {0} can only be recorded by HR")]
    LeaveTypeNotSelectable(LeaveType),

    /// Exercise period dates are inconsistent.
    #[error("Exercise period end {end} must be after start {start}")]
    InvalidPeriod {
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
    },

    /// A day count was negative.
    #[error("{field} cannot be negative (got {value})")]
    NegativeAllocation {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: i32,
    },

    /// Assigning the manager would create a loop in the hierarchy.
    #[error("Employee {employee} cannot report to {manager}: management cycle")]
    ManagerCycle {
        /// Employee being updated.
        employee: EmployeeId,
        /// Proposed manager.
        manager: EmployeeId,
    },

    /// No exercise period is active.
    #[error("No active exercise period is configured")]
    NoActivePeriod,

    /// Holiday computation failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// The range overlaps another request of the same employee.
    #[error("Overlaps leave request {conflicting_id} ({start} to {end})")]
    Overlap {
        /// Conflicting request.
        conflicting_id: LeaveRequestId,
        /// Its start date.
        start: NaiveDate,
        /// Its end date.
        end: NaiveDate,
    },

    /// Login already taken.
    #[error("Login {0} is already in use")]
    DuplicateLogin(String),

    /// A holiday already exists on that date.
    #[error("A holiday already exists on {0}")]
    HolidayExists(NaiveDate),

    /// Remaining balance is lower than the requested days.
    #[error("Insufficient balance: {remaining} day(s) remaining, {requested} requested")]
    InsufficientBalance {
        /// Days remaining.
        remaining: i32,
        /// Days requested.
        requested: i32,
    },

    /// The action is not allowed from the current status.
    #[error("Cannot {action} a request in status {from}")]
    InvalidTransition {
        /// Current status.
        from: LeaveStatus,
        /// Attempted action.
        action: LeaveAction,
    },

    /// The actor may not perform the action on this request.
    #[error("Employee {actor} is not permitted to {action} this request")]
    ActorNotPermitted {
        /// Acting employee.
        actor: EmployeeId,
        /// Attempted action.
        action: LeaveAction,
    },

    /// Leave request not found.
    #[error("Leave request {0} not found")]
    RequestNotFound(LeaveRequestId),

    /// Employee not found.
    #[error("Employee {0} not found")]
    EmployeeNotFound(EmployeeId),

    /// Exercise period not found.
    #[error("Exercise period {0} not found")]
    PeriodNotFound(ExercisePeriodId),

    /// Holiday not found.
    #[error("Holiday {0} not found")]
    HolidayNotFound(HolidayId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LeaveError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> LeaveErrorKind {
        match self {
            Self::EndBeforeStart { .. }
            | Self::NoWorkingDays { .. }
            | Self::ReasonRequired
            | Self::LeaveTypeNotSelectable(_)
            | Self::InvalidPeriod { .. }
            | Self::NegativeAllocation { .. }
            | Self::ManagerCycle { .. }
            | Self::NoActivePeriod
            | Self::Calendar(_) => LeaveErrorKind::Validation,

            Self::Overlap { .. } | Self::DuplicateLogin(_) | Self::HolidayExists(_) => {
                LeaveErrorKind::Conflict
            }

            Self::InsufficientBalance { .. } => LeaveErrorKind::InsufficientBalance,

            Self::InvalidTransition { .. } | Self::ActorNotPermitted { .. } => {
                LeaveErrorKind::InvalidStateTransition
            }

            Self::RequestNotFound(_)
            | Self::EmployeeNotFound(_)
            | Self::PeriodNotFound(_)
            | Self::HolidayNotFound(_) => LeaveErrorKind::NotFound,

            Self::Database(_) => LeaveErrorKind::Infrastructure,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::ActorNotPermitted { .. } => 403,
            _ => match self.kind() {
                LeaveErrorKind::Validation => 400,
                LeaveErrorKind::Conflict => 409,
                LeaveErrorKind::InsufficientBalance | LeaveErrorKind::InvalidStateTransition => {
                    422
                }
                LeaveErrorKind::NotFound => 404,
                LeaveErrorKind::Infrastructure => 500,
            },
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EndBeforeStart { .. } => "END_BEFORE_START",
            Self::NoWorkingDays { .. } => "NO_WORKING_DAYS",
            Self::ReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::LeaveTypeNotSelectable(_) => "LEAVE_TYPE_NOT_SELECTABLE",
            Self::InvalidPeriod { .. } => "INVALID_PERIOD",
            Self::NegativeAllocation { .. } => "NEGATIVE_ALLOCATION",
            Self::ManagerCycle { .. } => "MANAGER_CYCLE",
            Self::NoActivePeriod => "NO_ACTIVE_PERIOD",
            Self::Calendar(_) => "UNSUPPORTED_YEAR",
            Self::Overlap { .. } => "LEAVE_OVERLAP",
            Self::DuplicateLogin(_) => "DUPLICATE_LOGIN",
            Self::HolidayExists(_) => "HOLIDAY_EXISTS",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ActorNotPermitted { .. } => "ACTOR_NOT_PERMITTED",
            Self::RequestNotFound(_) => "LEAVE_REQUEST_NOT_FOUND",
            Self::EmployeeNotFound(_) => "EMPLOYEE_NOT_FOUND",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::HolidayNotFound(_) => "HOLIDAY_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns true for storage failures, the only unexpected outcome.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind(), LeaveErrorKind::Infrastructure)
    }
}

impl From<LeaveError> for AppError {
    fn from(err: LeaveError) -> Self {
        let message = err.to_string();
        match err {
            LeaveError::ActorNotPermitted { .. } => Self::Forbidden(message),
            LeaveError::Database(_) => Self::Database(message),
            other => match other.kind() {
                LeaveErrorKind::Validation => Self::Validation(message),
                LeaveErrorKind::Conflict => Self::Conflict(message),
                LeaveErrorKind::InsufficientBalance | LeaveErrorKind::InvalidStateTransition => {
                    Self::BusinessRule(message)
                }
                LeaveErrorKind::NotFound => Self::NotFound(message),
                LeaveErrorKind::Infrastructure => Self::Internal(message),
            },
        }
    }
}
