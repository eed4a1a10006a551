//! Lifecycle actions and transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use leavedesk_shared::types::EmployeeId;

use crate::leave::types::LeaveStatus;

/// Action attempted on a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveAction {
    /// Employee submits a new request.
    Submit,
    /// HR records an already approved request.
    Record,
    /// Manager approves.
    ManagerApprove,
    /// Manager rejects.
    ManagerReject,
    /// HR approves.
    HrApprove,
    /// HR rejects.
    HrReject,
    /// Owner cancels.
    Cancel,
    /// HR corrects dates, type or comment.
    Edit,
    /// HR deletes the request.
    Delete,
}

impl fmt::Display for LeaveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Submit => "submit",
            Self::Record => "record",
            Self::ManagerApprove => "approve as manager",
            Self::ManagerReject => "reject as manager",
            Self::HrApprove => "approve as HR",
            Self::HrReject => "reject as HR",
            Self::Cancel => "cancel",
            Self::Edit => "edit",
            Self::Delete => "delete",
        };
        f.write_str(text)
    }
}

/// Approval audit fields carried by a leave request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStamps {
    /// Manager who decided at the first level.
    pub approved_by_manager_id: Option<EmployeeId>,
    /// When the manager decided.
    pub approved_by_manager_at: Option<DateTime<Utc>>,
    /// Final decision maker.
    pub approved_by_id: Option<EmployeeId>,
    /// When the final decision was made.
    pub approved_at: Option<DateTime<Utc>>,
    /// Reason given on rejection.
    pub rejection_reason: Option<String>,
}

/// A validated state change with its audit data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveTransition {
    /// A new request enters the lifecycle.
    Submitted {
        /// PendingManager or PendingHr.
        new_status: LeaveStatus,
    },
    /// HR records a request directly as approved.
    Recorded {
        /// Always Approved.
        new_status: LeaveStatus,
        /// HR user recording the leave.
        approved_by: EmployeeId,
        /// When it was recorded.
        approved_at: DateTime<Utc>,
    },
    /// Manager forwards the request to HR.
    ManagerApproved {
        /// Always PendingHr.
        new_status: LeaveStatus,
        /// Approving manager.
        manager_id: EmployeeId,
        /// When the manager approved.
        approved_at: DateTime<Utc>,
    },
    /// Manager rejects the request.
    ManagerRejected {
        /// Always Rejected.
        new_status: LeaveStatus,
        /// Rejecting manager.
        manager_id: EmployeeId,
        /// When the manager rejected.
        rejected_at: DateTime<Utc>,
        /// Trimmed reason.
        rejection_reason: String,
    },
    /// HR grants the request.
    HrApproved {
        /// Always Approved.
        new_status: LeaveStatus,
        /// Approving HR user.
        approved_by: EmployeeId,
        /// When HR approved.
        approved_at: DateTime<Utc>,
    },
    /// HR rejects the request.
    HrRejected {
        /// Always Rejected.
        new_status: LeaveStatus,
        /// Rejecting HR user.
        rejected_by: EmployeeId,
        /// When HR rejected.
        rejected_at: DateTime<Utc>,
        /// Trimmed reason.
        rejection_reason: String,
    },
    /// Owner withdraws a pending request.
    Cancelled {
        /// Always Cancelled.
        new_status: LeaveStatus,
    },
}

impl LeaveTransition {
    /// Returns the status after the transition.
    #[must_use]
    pub fn new_status(&self) -> LeaveStatus {
        match self {
            Self::Submitted { new_status }
            | Self::Recorded { new_status, .. }
            | Self::ManagerApproved { new_status, .. }
            | Self::ManagerRejected { new_status, .. }
            | Self::HrApproved { new_status, .. }
            | Self::HrRejected { new_status, .. }
            | Self::Cancelled { new_status } => *new_status,
        }
    }

    /// Returns the action that produced the transition.
    #[must_use]
    pub fn action(&self) -> LeaveAction {
        match self {
            Self::Submitted { .. } => LeaveAction::Submit,
            Self::Recorded { .. } => LeaveAction::Record,
            Self::ManagerApproved { .. } => LeaveAction::ManagerApprove,
            Self::ManagerRejected { .. } => LeaveAction::ManagerReject,
            Self::HrApproved { .. } => LeaveAction::HrApprove,
            Self::HrRejected { .. } => LeaveAction::HrReject,
            Self::Cancelled { .. } => LeaveAction::Cancel,
        }
    }

    /// Writes the transition's audit fields into `stamps`.
    pub fn apply_to(&self, stamps: &mut ApprovalStamps) {
        match self {
            Self::Submitted { .. } | Self::Cancelled { .. } => {}
            Self::Recorded {
                approved_by,
                approved_at,
                ..
            }
            | Self::HrApproved {
                approved_by,
                approved_at,
                ..
            } => {
                stamps.approved_by_id = Some(*approved_by);
                stamps.approved_at = Some(*approved_at);
                stamps.rejection_reason = None;
            }
            Self::ManagerApproved {
                manager_id,
                approved_at,
                ..
            } => {
                stamps.approved_by_manager_id = Some(*manager_id);
                stamps.approved_by_manager_at = Some(*approved_at);
            }
            Self::ManagerRejected {
                manager_id,
                rejected_at,
                rejection_reason,
                ..
            } => {
                stamps.approved_by_manager_id = Some(*manager_id);
                stamps.approved_by_manager_at = Some(*rejected_at);
                stamps.approved_by_id = Some(*manager_id);
                stamps.approved_at = Some(*rejected_at);
                stamps.rejection_reason = Some(rejection_reason.clone());
            }
            Self::HrRejected {
                rejected_by,
                rejected_at,
                rejection_reason,
                ..
            } => {
                stamps.approved_by_id = Some(*rejected_by);
                stamps.approved_at = Some(*rejected_at);
                stamps.rejection_reason = Some(rejection_reason.clone());
            }
        }
    }
}
