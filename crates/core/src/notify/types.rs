//! Notice types.

use serde::{Deserialize, Serialize};
use std::fmt;

use leavedesk_shared::types::{EmployeeId, LeaveRequestId};

/// What a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeCategory {
    /// New request waiting for the recipient as manager.
    RequestForManager,
    /// New request waiting for HR (owner has no manager).
    RequestForHr,
    /// Manager-approved request waiting for HR.
    ForwardedToHr,
    /// The recipient's request was approved.
    Approved,
    /// The recipient's request was rejected.
    Rejected,
    /// HR recorded leave on the recipient's behalf.
    Recorded,
}

impl NoticeCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequestForManager => "request_for_manager",
            Self::RequestForHr => "request_for_hr",
            Self::ForwardedToHr => "forwarded_to_hr",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Recorded => "recorded",
        }
    }
}

impl fmt::Display for NoticeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message addressed to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Recipient.
    pub recipient: EmployeeId,
    /// Category.
    pub category: NoticeCategory,
    /// Short title.
    pub title: String,
    /// Full message.
    pub body: String,
    /// Related request, if any.
    pub leave_request_id: Option<LeaveRequestId>,
}
