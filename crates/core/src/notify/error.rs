//! Notification delivery errors.

use thiserror::Error;

use leavedesk_shared::AppError;

/// Errors raised while delivering a notice.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notice could not be stored.
    #[error("Failed to store notification: {0}")]
    Storage(String),

    /// The notice could not be forwarded (email, push).
    #[error("Failed to deliver notification: {0}")]
    Delivery(String),
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::Storage(_) => Self::Database(err.to_string()),
            NotifyError::Delivery(_) => Self::ExternalService(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_failure_is_external() {
        let app: AppError = NotifyError::Delivery("relay refused".to_string()).into();
        assert_eq!(app.error_code(), "EXTERNAL_SERVICE_ERROR");
        assert!(!app.is_expected());
    }

    #[test]
    fn test_storage_failure_is_database() {
        let app: AppError = NotifyError::Storage("disk full".to_string()).into();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.to_string(), "Database error: Failed to store notification: disk full");
    }
}
