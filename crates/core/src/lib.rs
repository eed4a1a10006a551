//! Core business logic for Leavedesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `calendar` - Public holidays and working-day counting
//! - `leave` - Leave types, statuses, overlap detection and errors
//! - `ledger` - Exercise periods, allocations and balances
//! - `workflow` - Two-level approval state machine
//! - `staff` - Manager hierarchy rules
//! - `notify` - Notification messages and the `Notifier` seam

pub mod calendar;
pub mod leave;
pub mod ledger;
pub mod notify;
pub mod staff;
pub mod workflow;

pub use leave::{LeaveError, LeaveErrorKind};
