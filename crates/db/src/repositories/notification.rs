//! In-app notifications: the stored inbox and the `Notifier` that fills it.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, sea_query::Expr,
};
use uuid::Uuid;

use leavedesk_core::LeaveError;
use leavedesk_core::notify::{Notice, Notifier, NotifyError};
use leavedesk_shared::EmailService;
use leavedesk_shared::types::{EmployeeId, LeaveRequestId, NotificationId};

use crate::entities::{employees, notifications};

use super::conversions::db_err;

/// Maximum number of notices returned by [`NotificationRepository::list_for`].
pub const INBOX_LIMIT: u64 = 100;

/// Stores notices in the `notifications` table and optionally forwards them
/// by email to the recipient's address.
#[derive(Clone)]
pub struct InAppNotifier {
    db: DatabaseConnection,
    email: Option<EmailService>,
}

impl InAppNotifier {
    /// Creates a notifier that only stores notices.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db, email: None }
    }

    /// Also forwards each notice by email when the service is enabled.
    #[must_use]
    pub fn with_email(mut self, email: EmailService) -> Self {
        self.email = Some(email);
        self
    }

    async fn forward(&self, email: &EmailService, notice: &Notice) -> Result<(), NotifyError> {
        let recipient = employees::Entity::find_by_id(notice.recipient.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| NotifyError::Storage(e.to_string()))?;

        let Some(address) = recipient.and_then(|r| r.email).filter(|a| !a.trim().is_empty()) else {
            tracing::debug!(recipient = %notice.recipient, "No email address, notice kept in-app only");
            return Ok(());
        };

        email
            .send_email(&address, &notice.title, &notice.body)
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Notifier for InAppNotifier {
    async fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        notifications::ActiveModel {
            id: Set(Uuid::now_v7()),
            employee_id: Set(notice.recipient.into_inner()),
            category: Set(notice.category.into()),
            title: Set(notice.title.clone()),
            body: Set(notice.body.clone()),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            leave_request_id: Set(notice.leave_request_id.map(LeaveRequestId::into_inner)),
        }
        .insert(&self.db)
        .await
        .map_err(|e| NotifyError::Storage(e.to_string()))?;

        if let Some(email) = self.email.as_ref().filter(|e| e.is_enabled()) {
            self.forward(email, notice).await?;
        }
        Ok(())
    }
}

/// Notification inbox repository.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    /// Creates a new notification repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The employee's latest notices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<notifications::Model>, LeaveError> {
        notifications::Entity::find()
            .filter(notifications::Column::EmployeeId.eq(employee_id.into_inner()))
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .limit(INBOX_LIMIT)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Number of unread notices.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn unread_count(&self, employee_id: EmployeeId) -> Result<u64, LeaveError> {
        notifications::Entity::find()
            .filter(notifications::Column::EmployeeId.eq(employee_id.into_inner()))
            .filter(notifications::Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    /// Marks one notice read. Returns false if the notice does not belong
    /// to the employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_read(
        &self,
        employee_id: EmployeeId,
        id: NotificationId,
    ) -> Result<bool, LeaveError> {
        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::IsRead, Expr::value(true))
            .filter(notifications::Column::Id.eq(id.into_inner()))
            .filter(notifications::Column::EmployeeId.eq(employee_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    /// Marks every notice of the employee read. Returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_all_read(&self, employee_id: EmployeeId) -> Result<u64, LeaveError> {
        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::IsRead, Expr::value(true))
            .filter(notifications::Column::EmployeeId.eq(employee_id.into_inner()))
            .filter(notifications::Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
