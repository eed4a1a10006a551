//! Repository layer for database operations.
//!
//! Repositories hold a `DatabaseConnection`. Helpers suffixed `_in` take any
//! `ConnectionTrait` so they can run inside a caller's transaction.

mod conversions;

pub mod employee;
pub mod exercise;
pub mod holiday;
pub mod leave;
pub mod ledger;
pub mod notification;
pub mod report;
pub mod workflow;

pub use employee::{EmployeeRepository, NewEmployee};
pub use exercise::{ExerciseRepository, PeriodInput};
pub use holiday::{HolidayRepository, LoadSummary};
pub use leave::LeaveRepository;
pub use ledger::LedgerRepository;
pub use notification::{INBOX_LIMIT, InAppNotifier, NotificationRepository};
pub use report::{EmployeeStatement, ReportRepository, RequestWithOwner, TeamMember};
pub use workflow::{LeaveEdit, LeaveWorkflowRepository};
