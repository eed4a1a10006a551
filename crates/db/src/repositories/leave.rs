//! Leave request queries.

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
    sea_query::{Expr, SimpleExpr},
};

use leavedesk_core::LeaveError;
use leavedesk_shared::types::{EmployeeId, LeaveRequestId};

use crate::entities::leave_requests;

use super::conversions::db_err;

/// Read access to leave requests.
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    db: DatabaseConnection,
}

impl LeaveRepository {
    /// Creates a new leave repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a request by ID.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if absent.
    pub async fn find(&self, id: LeaveRequestId) -> Result<leave_requests::Model, LeaveError> {
        find_request_in(&self.db, id).await
    }

    /// First request of the employee intersecting `[start, end]`.
    ///
    /// Every status counts, including rejected and cancelled requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_overlap(
        &self,
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<LeaveRequestId>,
    ) -> Result<Option<leave_requests::Model>, LeaveError> {
        find_overlap_in(&self.db, employee_id, start, end, exclude).await
    }

    /// All requests of an employee, latest start first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<leave_requests::Model>, LeaveError> {
        leave_requests::Entity::find()
            .filter(leave_requests::Column::EmployeeId.eq(employee_id.into_inner()))
            .order_by_desc(leave_requests::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

pub(crate) async fn find_request_in<C: ConnectionTrait>(
    conn: &C,
    id: LeaveRequestId,
) -> Result<leave_requests::Model, LeaveError> {
    leave_requests::Entity::find_by_id(id.into_inner())
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or(LeaveError::RequestNotFound(id))
}

/// Loads and locks a request row for the rest of the transaction.
///
/// On SQLite a no-op write takes the database write lock first, as in
/// `lock_employee_in`.
pub(crate) async fn lock_request_in<C: ConnectionTrait>(
    conn: &C,
    id: LeaveRequestId,
) -> Result<leave_requests::Model, LeaveError> {
    let mut query = leave_requests::Entity::find_by_id(id.into_inner());
    let backend = conn.get_database_backend();
    if backend == DbBackend::Postgres {
        query = query.lock_exclusive();
    } else if backend == DbBackend::Sqlite {
        leave_requests::Entity::update_many()
            .col_expr(
                leave_requests::Column::Id,
                SimpleExpr::from(Expr::col(leave_requests::Column::Id)),
            )
            .filter(leave_requests::Column::Id.eq(id.into_inner()))
            .exec(conn)
            .await
            .map_err(db_err)?;
    }
    query
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or(LeaveError::RequestNotFound(id))
}

pub(crate) async fn find_overlap_in<C: ConnectionTrait>(
    conn: &C,
    employee_id: EmployeeId,
    start: NaiveDate,
    end: NaiveDate,
    exclude: Option<LeaveRequestId>,
) -> Result<Option<leave_requests::Model>, LeaveError> {
    let mut query = leave_requests::Entity::find()
        .filter(leave_requests::Column::EmployeeId.eq(employee_id.into_inner()))
        .filter(leave_requests::Column::StartDate.lte(end))
        .filter(leave_requests::Column::EndDate.gte(start));
    if let Some(excluded) = exclude {
        query = query.filter(leave_requests::Column::Id.ne(excluded.into_inner()));
    }
    query
        .order_by_asc(leave_requests::Column::StartDate)
        .one(conn)
        .await
        .map_err(db_err)
}
