//! Notification messages and the delivery seam.
//!
//! # Modules
//!
//! - `types` - `Notice` and `NoticeCategory`
//! - `messages` - Builders for each lifecycle event
//! - `error` - Delivery errors
//!
//! Delivery is abstracted by [`Notifier`]. Implementations live outside the
//! core; a failed delivery never affects the transition that caused it.

pub mod error;
pub mod messages;
pub mod types;

pub use error::NotifyError;
pub use messages::LeaveSummary;
pub use types::{Notice, NoticeCategory};

/// Delivers notices to their recipients.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one notice.
    async fn notify(&self, notice: &Notice) -> Result<(), NotifyError>;
}
