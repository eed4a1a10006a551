//! Enum columns stored as short strings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `employees.role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Role {
    /// Human resources.
    #[sea_orm(string_value = "hr")]
    Hr,
    /// Line manager.
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Employee.
    #[sea_orm(string_value = "employee")]
    Employee,
}

/// `leave_requests.leave_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum LeaveType {
    /// Paid leave.
    #[sea_orm(string_value = "paid_leave")]
    PaidLeave,
    /// RTT.
    #[sea_orm(string_value = "rtt")]
    Rtt,
    /// Unpaid leave.
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
    /// Sick leave.
    #[sea_orm(string_value = "sick")]
    Sick,
    /// Seniority leave.
    #[sea_orm(string_value = "seniority")]
    Seniority,
}

/// `leave_requests.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum LeaveStatus {
    /// Waiting for the manager.
    #[sea_orm(string_value = "pending_manager")]
    PendingManager,
    /// Waiting for HR.
    #[sea_orm(string_value = "pending_hr")]
    PendingHr,
    /// Approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// `notifications.category`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum NoticeCategory {
    /// New request for the manager.
    #[sea_orm(string_value = "request_for_manager")]
    RequestForManager,
    /// New request for HR.
    #[sea_orm(string_value = "request_for_hr")]
    RequestForHr,
    /// Forwarded to HR by the manager.
    #[sea_orm(string_value = "forwarded_to_hr")]
    ForwardedToHr,
    /// Approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Recorded by HR.
    #[sea_orm(string_value = "recorded")]
    Recorded,
}
