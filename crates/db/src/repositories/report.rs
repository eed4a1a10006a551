//! Read-only queries for statements, calendars and approval queues.

use std::collections::HashSet;

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;
use uuid::Uuid;

use leavedesk_core::LeaveError;
use leavedesk_core::calendar::CalendarError;
use leavedesk_core::leave::{LeaveStatus, YearSummary, summarize_by_year};
use leavedesk_core::ledger::{Balance, ExercisePeriod};
use leavedesk_shared::types::EmployeeId;

use crate::entities::sea_orm_active_enums::LeaveStatus as DbLeaveStatus;
use crate::entities::{employees, leave_requests};

use super::conversions::{db_err, to_record};
use super::employee::find_employee_in;
use super::ledger::{balance_in, resolve_period_in};

/// An employee with their requests and current balance.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeStatement {
    /// The employee.
    pub employee: employees::Model,
    /// Requests, latest start first.
    pub requests: Vec<leave_requests::Model>,
    /// Balance for the active period.
    pub balance: Balance,
}

/// A request together with its owner.
#[derive(Debug, Clone, Serialize)]
pub struct RequestWithOwner {
    /// The request.
    pub request: leave_requests::Model,
    /// Its owner.
    pub employee: employees::Model,
}

/// One row of the team overview.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    /// The employee.
    pub employee: employees::Model,
    /// Balance for the active period.
    pub balance: Balance,
    /// Whether an approved request covers the reference day.
    pub on_leave: bool,
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Statement for one employee.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if absent.
    pub async fn employee_statement(
        &self,
        employee_id: EmployeeId,
    ) -> Result<EmployeeStatement, LeaveError> {
        let employee = find_employee_in(&self.db, employee_id).await?;
        let period = resolve_period_in(&self.db, None).await?;
        statement_in(&self.db, employee, period.as_ref()).await
    }

    /// Statements for every active employee, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn team_statements(&self) -> Result<Vec<EmployeeStatement>, LeaveError> {
        let period = resolve_period_in(&self.db, None).await?;
        let mut statements = Vec::new();
        for employee in active_employees_in(&self.db).await? {
            statements.push(statement_in(&self.db, employee, period.as_ref()).await?);
        }
        Ok(statements)
    }

    /// Approved and pending requests intersecting `year`, by start date.
    ///
    /// # Errors
    ///
    /// Returns `Calendar` for a year chrono cannot represent.
    pub async fn calendar(
        &self,
        year: i32,
        employee_id: Option<EmployeeId>,
    ) -> Result<Vec<RequestWithOwner>, LeaveError> {
        let unsupported = || LeaveError::Calendar(CalendarError::UnsupportedYear(year));
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(unsupported)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(unsupported)?;

        let visible = [
            LeaveStatus::Approved,
            LeaveStatus::PendingManager,
            LeaveStatus::PendingHr,
        ]
        .map(DbLeaveStatus::from);

        let mut query = leave_requests::Entity::find()
            .find_also_related(employees::Entity)
            .filter(leave_requests::Column::Status.is_in(visible))
            .filter(leave_requests::Column::StartDate.lte(last))
            .filter(leave_requests::Column::EndDate.gte(first));
        if let Some(employee_id) = employee_id {
            query = query.filter(leave_requests::Column::EmployeeId.eq(employee_id.into_inner()));
        }

        let rows = query
            .order_by_asc(leave_requests::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(with_owners(rows))
    }

    /// Approved leave per start year, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn yearly_history(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<YearSummary>, LeaveError> {
        let rows = leave_requests::Entity::find()
            .filter(leave_requests::Column::EmployeeId.eq(employee_id.into_inner()))
            .filter(leave_requests::Column::Status.eq(DbLeaveStatus::Approved))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let records: Vec<_> = rows.iter().map(to_record).collect();
        Ok(summarize_by_year(&records))
    }

    /// Balance and presence of every active employee on `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn team_overview(&self, today: NaiveDate) -> Result<Vec<TeamMember>, LeaveError> {
        let period = resolve_period_in(&self.db, None).await?;

        let absent: HashSet<Uuid> = leave_requests::Entity::find()
            .filter(leave_requests::Column::Status.eq(DbLeaveStatus::Approved))
            .filter(leave_requests::Column::StartDate.lte(today))
            .filter(leave_requests::Column::EndDate.gte(today))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|r| r.employee_id)
            .collect();

        let mut members = Vec::new();
        for employee in active_employees_in(&self.db).await? {
            let balance =
                balance_in(&self.db, EmployeeId::from_uuid(employee.id), period.as_ref()).await?;
            members.push(TeamMember {
                on_leave: absent.contains(&employee.id),
                employee,
                balance,
            });
        }
        Ok(members)
    }

    /// Requests waiting for `manager_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn pending_for_manager(
        &self,
        manager_id: EmployeeId,
    ) -> Result<Vec<RequestWithOwner>, LeaveError> {
        let rows = leave_requests::Entity::find()
            .find_also_related(employees::Entity)
            .filter(leave_requests::Column::Status.eq(DbLeaveStatus::PendingManager))
            .filter(employees::Column::ManagerId.eq(manager_id.into_inner()))
            .order_by_asc(leave_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(with_owners(rows))
    }

    /// Requests waiting for HR, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn pending_for_hr(&self) -> Result<Vec<RequestWithOwner>, LeaveError> {
        let rows = leave_requests::Entity::find()
            .find_also_related(employees::Entity)
            .filter(leave_requests::Column::Status.eq(DbLeaveStatus::PendingHr))
            .order_by_asc(leave_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(with_owners(rows))
    }
}

async fn statement_in<C: ConnectionTrait>(
    conn: &C,
    employee: employees::Model,
    period: Option<&ExercisePeriod>,
) -> Result<EmployeeStatement, LeaveError> {
    let requests = leave_requests::Entity::find()
        .filter(leave_requests::Column::EmployeeId.eq(employee.id))
        .order_by_desc(leave_requests::Column::StartDate)
        .all(conn)
        .await
        .map_err(db_err)?;
    let balance = balance_in(conn, EmployeeId::from_uuid(employee.id), period).await?;
    Ok(EmployeeStatement {
        employee,
        requests,
        balance,
    })
}

async fn active_employees_in<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<employees::Model>, LeaveError> {
    employees::Entity::find()
        .filter(employees::Column::IsActive.eq(true))
        .order_by_asc(employees::Column::Name)
        .order_by_asc(employees::Column::FirstName)
        .all(conn)
        .await
        .map_err(db_err)
}

/// Drops rows whose owner vanished between the join and the read.
fn with_owners(
    rows: Vec<(leave_requests::Model, Option<employees::Model>)>,
) -> Vec<RequestWithOwner> {
    rows.into_iter()
        .filter_map(|(request, employee)| employee.map(|employee| RequestWithOwner { request, employee }))
        .collect()
}
