//! Leave request domain.
//!
//! # Modules
//!
//! - `types` - Leave types, statuses, date ranges and request records
//! - `error` - The crate-wide `LeaveError` and its classification
//! - `overlap` - Overlap detection between date ranges
//! - `validation` - Input checks shared by submission and HR edits
//! - `history` - Yearly aggregation of approved leave

pub mod error;
pub mod history;
pub mod overlap;
pub mod types;
pub mod validation;

#[cfg(test)]
mod overlap_props;

pub use error::{LeaveError, LeaveErrorKind};
pub use history::{YearSummary, summarize_by_year};
pub use overlap::ranges_overlap;
pub use types::{DateRange, LeaveDraft, LeaveRecord, LeaveStatus, LeaveType};
pub use validation::{require_reason, require_selectable, require_working_days, validate_range};
