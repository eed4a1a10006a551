//! Leave request lifecycle.
//!
//! This module implements the two-level approval state machine
//! (manager, then HR) and the role guards around it.
//!
//! # Modules
//!
//! - `role` - Roles, actors and request parties
//! - `types` - Actions, transitions and approval stamps
//! - `service` - State transition logic

pub mod role;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use role::{Actor, RequestParty, Role};
pub use service::LifecycleService;
pub use types::{ApprovalStamps, LeaveAction, LeaveTransition};
