//! Employee repository for database operations.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::{Expr, SimpleExpr},
};
use uuid::Uuid;

use leavedesk_core::LeaveError;
use leavedesk_core::staff::{ManagerChain, check_manager_assignment};
use leavedesk_core::workflow::Role as CoreRole;
use leavedesk_shared::types::EmployeeId;

use crate::entities::{employees, sea_orm_active_enums::Role};

use super::conversions::db_err;

/// Input for creating an employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Family name.
    pub name: String,
    /// Given name.
    pub first_name: String,
    /// Unique login.
    pub login: String,
    /// Password hash produced by the authentication layer.
    pub password_hash: String,
    /// Role.
    pub role: CoreRole,
    /// Contact email, used to forward notices.
    pub email: Option<String>,
    /// Hiring date.
    pub hire_date: Option<NaiveDate>,
    /// Line manager.
    pub manager_id: Option<EmployeeId>,
}

/// Employee repository.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active employee.
    ///
    /// # Errors
    ///
    /// - `DuplicateLogin` if the login is taken
    /// - `EmployeeNotFound` if the manager does not exist
    pub async fn create_employee(&self, input: NewEmployee) -> Result<employees::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let taken = employees::Entity::find()
            .filter(employees::Column::Login.eq(input.login.as_str()))
            .count(&txn)
            .await
            .map_err(db_err)?;
        if taken > 0 {
            return Err(LeaveError::DuplicateLogin(input.login));
        }

        if let Some(manager_id) = input.manager_id {
            find_employee_in(&txn, manager_id).await?;
        }

        let employee = employees::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            first_name: Set(input.first_name),
            login: Set(input.login),
            password_hash: Set(input.password_hash),
            role: Set(input.role.into()),
            is_active: Set(true),
            hire_date: Set(input.hire_date),
            email: Set(input.email),
            manager_id: Set(input.manager_id.map(EmployeeId::into_inner)),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        tracing::info!(employee_id = %employee.id, login = %employee.login, "Employee created");
        Ok(employee)
    }

    /// Finds an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if absent.
    pub async fn find(&self, id: EmployeeId) -> Result<employees::Model, LeaveError> {
        find_employee_in(&self.db, id).await
    }

    /// Finds an employee by login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<employees::Model>, LeaveError> {
        employees::Entity::find()
            .filter(employees::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Active employees ordered by name, then first name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<employees::Model>, LeaveError> {
        employees::Entity::find()
            .filter(employees::Column::IsActive.eq(true))
            .order_by_asc(employees::Column::Name)
            .order_by_asc(employees::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Employees whose manager is `manager_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn direct_reports(
        &self,
        manager_id: EmployeeId,
    ) -> Result<Vec<employees::Model>, LeaveError> {
        employees::Entity::find()
            .filter(employees::Column::ManagerId.eq(manager_id.into_inner()))
            .order_by_asc(employees::Column::Name)
            .order_by_asc(employees::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Active HR users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn hr_recipients(&self) -> Result<Vec<employees::Model>, LeaveError> {
        hr_recipients_in(&self.db).await
    }

    /// Sets or clears an employee's manager.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if either employee does not exist
    /// - `ManagerCycle` if the chain would loop back to the employee
    pub async fn assign_manager(
        &self,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> Result<employees::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let employee = lock_employee_in(&txn, employee_id).await?;

        if let Some(manager_id) = manager_id {
            find_employee_in(&txn, manager_id).await?;
            let links: Vec<(Uuid, Option<Uuid>)> = employees::Entity::find()
                .select_only()
                .column(employees::Column::Id)
                .column(employees::Column::ManagerId)
                .into_tuple()
                .all(&txn)
                .await
                .map_err(db_err)?;
            let chain = ManagerChain::new(links.into_iter().map(|(id, manager)| {
                (EmployeeId::from_uuid(id), manager.map(EmployeeId::from_uuid))
            }));
            check_manager_assignment(&chain, employee_id, manager_id)?;
        }

        let mut active: employees::ActiveModel = employee.into();
        active.manager_id = Set(manager_id.map(EmployeeId::into_inner));
        let updated = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        tracing::info!(
            employee_id = %employee_id,
            manager_id = ?manager_id,
            "Manager assigned"
        );
        Ok(updated)
    }

    /// Activates or deactivates an employee.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if absent.
    pub async fn set_active(
        &self,
        employee_id: EmployeeId,
        is_active: bool,
    ) -> Result<employees::Model, LeaveError> {
        let employee = find_employee_in(&self.db, employee_id).await?;
        let mut active: employees::ActiveModel = employee.into();
        active.is_active = Set(is_active);
        active.update(&self.db).await.map_err(db_err)
    }
}

/// Loads an employee or fails with `EmployeeNotFound`.
pub(crate) async fn find_employee_in<C: ConnectionTrait>(
    conn: &C,
    id: EmployeeId,
) -> Result<employees::Model, LeaveError> {
    employees::Entity::find_by_id(id.into_inner())
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or(LeaveError::EmployeeNotFound(id))
}

/// Loads and locks an employee row for the rest of the transaction.
///
/// SQLite has no row locks. There a no-op write claims the database write
/// lock before anything is read, so a concurrent writer waits on the busy
/// timeout instead of failing on lock upgrade.
pub(crate) async fn lock_employee_in<C: ConnectionTrait>(
    conn: &C,
    id: EmployeeId,
) -> Result<employees::Model, LeaveError> {
    let mut query = employees::Entity::find_by_id(id.into_inner());
    let backend = conn.get_database_backend();
    if backend == DbBackend::Postgres {
        query = query.lock_exclusive();
    } else if backend == DbBackend::Sqlite {
        employees::Entity::update_many()
            .col_expr(
                employees::Column::Id,
                SimpleExpr::from(Expr::col(employees::Column::Id)),
            )
            .filter(employees::Column::Id.eq(id.into_inner()))
            .exec(conn)
            .await
            .map_err(db_err)?;
    }
    query
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or(LeaveError::EmployeeNotFound(id))
}

/// Active HR users ordered by name.
pub(crate) async fn hr_recipients_in<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<employees::Model>, LeaveError> {
    employees::Entity::find()
        .filter(employees::Column::Role.eq(Role::Hr))
        .filter(employees::Column::IsActive.eq(true))
        .order_by_asc(employees::Column::Name)
        .all(conn)
        .await
        .map_err(db_err)
}
