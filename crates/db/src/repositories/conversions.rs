//! Conversions between database rows and core domain types.

use sea_orm::DbErr;

use leavedesk_core::LeaveError;
use leavedesk_core::leave::{LeaveRecord, LeaveStatus as CoreLeaveStatus, LeaveType as CoreLeaveType};
use leavedesk_core::ledger::{Allocation, AllocationDays, ExercisePeriod};
use leavedesk_core::notify::{LeaveSummary, NoticeCategory as CoreNoticeCategory};
use leavedesk_core::workflow::{Actor, ApprovalStamps, RequestParty, Role as CoreRole};
use leavedesk_shared::types::{
    AllocationId, EmployeeId, ExercisePeriodId, LeaveRequestId,
};

use crate::entities::{
    allocations, employees, exercise_periods, leave_requests,
    sea_orm_active_enums::{LeaveStatus, LeaveType, NoticeCategory, Role},
};

/// Wraps a storage error.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn db_err(err: DbErr) -> LeaveError {
    LeaveError::Database(err.to_string())
}

impl From<CoreLeaveStatus> for LeaveStatus {
    fn from(status: CoreLeaveStatus) -> Self {
        match status {
            CoreLeaveStatus::PendingManager => Self::PendingManager,
            CoreLeaveStatus::PendingHr => Self::PendingHr,
            CoreLeaveStatus::Approved => Self::Approved,
            CoreLeaveStatus::Rejected => Self::Rejected,
            CoreLeaveStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<LeaveStatus> for CoreLeaveStatus {
    fn from(status: LeaveStatus) -> Self {
        match status {
            LeaveStatus::PendingManager => Self::PendingManager,
            LeaveStatus::PendingHr => Self::PendingHr,
            LeaveStatus::Approved => Self::Approved,
            LeaveStatus::Rejected => Self::Rejected,
            LeaveStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<CoreLeaveType> for LeaveType {
    fn from(leave_type: CoreLeaveType) -> Self {
        match leave_type {
            CoreLeaveType::PaidLeave => Self::PaidLeave,
            CoreLeaveType::Rtt => Self::Rtt,
            CoreLeaveType::Unpaid => Self::Unpaid,
            CoreLeaveType::Sick => Self::Sick,
            CoreLeaveType::Seniority => Self::Seniority,
        }
    }
}

impl From<LeaveType> for CoreLeaveType {
    fn from(leave_type: LeaveType) -> Self {
        match leave_type {
            LeaveType::PaidLeave => Self::PaidLeave,
            LeaveType::Rtt => Self::Rtt,
            LeaveType::Unpaid => Self::Unpaid,
            LeaveType::Sick => Self::Sick,
            LeaveType::Seniority => Self::Seniority,
        }
    }
}

impl From<CoreRole> for Role {
    fn from(role: CoreRole) -> Self {
        match role {
            CoreRole::Hr => Self::Hr,
            CoreRole::Manager => Self::Manager,
            CoreRole::Employee => Self::Employee,
        }
    }
}

impl From<Role> for CoreRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Hr => Self::Hr,
            Role::Manager => Self::Manager,
            Role::Employee => Self::Employee,
        }
    }
}

impl From<CoreNoticeCategory> for NoticeCategory {
    fn from(category: CoreNoticeCategory) -> Self {
        match category {
            CoreNoticeCategory::RequestForManager => Self::RequestForManager,
            CoreNoticeCategory::RequestForHr => Self::RequestForHr,
            CoreNoticeCategory::ForwardedToHr => Self::ForwardedToHr,
            CoreNoticeCategory::Approved => Self::Approved,
            CoreNoticeCategory::Rejected => Self::Rejected,
            CoreNoticeCategory::Recorded => Self::Recorded,
        }
    }
}

/// The balance-relevant view of a request row.
pub(crate) fn to_record(model: &leave_requests::Model) -> LeaveRecord {
    LeaveRecord {
        id: LeaveRequestId::from_uuid(model.id),
        employee_id: EmployeeId::from_uuid(model.employee_id),
        start_date: model.start_date,
        end_date: model.end_date,
        working_days: model.working_days_count,
        leave_type: model.leave_type.into(),
        status: model.status.into(),
    }
}

pub(crate) fn to_period(model: &exercise_periods::Model) -> ExercisePeriod {
    ExercisePeriod {
        id: ExercisePeriodId::from_uuid(model.id),
        start_date: model.start_date,
        end_date: model.end_date,
        default_allocated_days: model.default_allocated_days,
        is_active: model.is_active,
    }
}

pub(crate) fn to_allocation(model: &allocations::Model) -> Allocation {
    Allocation {
        id: AllocationId::from_uuid(model.id),
        employee_id: EmployeeId::from_uuid(model.employee_id),
        period_id: ExercisePeriodId::from_uuid(model.period_id),
        days: AllocationDays {
            days_allocated: model.days_allocated,
            days_seniority: model.days_seniority,
            days_carry_over: model.days_carry_over,
        },
    }
}

pub(crate) fn to_actor(model: &employees::Model) -> Actor {
    Actor {
        id: EmployeeId::from_uuid(model.id),
        role: model.role.into(),
        is_active: model.is_active,
    }
}

pub(crate) fn to_party(owner: &employees::Model) -> RequestParty {
    RequestParty {
        owner: EmployeeId::from_uuid(owner.id),
        manager: owner.manager_id.map(EmployeeId::from_uuid),
    }
}

pub(crate) fn stamps_of(model: &leave_requests::Model) -> ApprovalStamps {
    ApprovalStamps {
        approved_by_manager_id: model.approved_by_manager_id.map(EmployeeId::from_uuid),
        approved_by_manager_at: model.approved_by_manager_at,
        approved_by_id: model.approved_by_id.map(EmployeeId::from_uuid),
        approved_at: model.approved_at,
        rejection_reason: model.rejection_reason.clone(),
    }
}

pub(crate) fn summary_of(request: &leave_requests::Model, owner: &employees::Model) -> LeaveSummary {
    LeaveSummary {
        request_id: LeaveRequestId::from_uuid(request.id),
        employee_name: owner.display_name(),
        start_date: request.start_date,
        end_date: request.end_date,
        working_days: request.working_days_count,
        leave_type: request.leave_type.into(),
    }
}
