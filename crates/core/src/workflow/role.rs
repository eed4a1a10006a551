//! Roles and the parties of a leave request.

use serde::{Deserialize, Serialize};
use std::fmt;

use leavedesk_shared::types::EmployeeId;

/// Closed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human resources: final approver and administrator.
    Hr,
    /// Line manager: first-level approver for direct reports.
    Manager,
    /// Regular employee.
    Employee,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hr => "hr",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The employee performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Acting employee.
    pub id: EmployeeId,
    /// Their role.
    pub role: Role,
    /// Inactive accounts cannot act.
    pub is_active: bool,
}

impl Actor {
    /// Returns true for an active HR user.
    #[must_use]
    pub fn is_hr(&self) -> bool {
        self.is_active && self.role == Role::Hr
    }
}

/// Owner of a request and the owner's configured manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestParty {
    /// Employee the request belongs to.
    pub owner: EmployeeId,
    /// Owner's line manager, if any.
    pub manager: Option<EmployeeId>,
}

impl RequestParty {
    /// Returns true if `actor` is the active owner.
    #[must_use]
    pub fn is_owner(&self, actor: &Actor) -> bool {
        actor.is_active && actor.id == self.owner
    }

    /// Returns true if `actor` is the owner's active manager.
    #[must_use]
    pub fn is_manager(&self, actor: &Actor) -> bool {
        actor.is_active && self.manager == Some(actor.id)
    }
}
