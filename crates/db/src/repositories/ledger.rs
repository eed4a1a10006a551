//! Allocation ledger: entitlements and derived balances.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use leavedesk_core::LeaveError;
use leavedesk_core::leave::{LeaveStatus, LeaveType};
use leavedesk_core::ledger::{
    Allocation, AllocationUpdate, Balance, BalanceCheck, ExercisePeriod, compute_balance,
};
use leavedesk_shared::types::{EmployeeId, ExercisePeriodId, LeaveRequestId};

use crate::entities::{allocations, leave_requests};
use crate::entities::sea_orm_active_enums::{
    LeaveStatus as DbLeaveStatus, LeaveType as DbLeaveType,
};

use super::conversions::{db_err, to_allocation, to_period, to_record};
use super::employee::lock_employee_in;
use super::exercise::{active_period_in, find_period_in};

/// Allocation ledger repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The active period, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn active_period(&self) -> Result<Option<ExercisePeriod>, LeaveError> {
        Ok(active_period_in(&self.db).await?.as_ref().map(to_period))
    }

    /// The employee's allocation for `period_id`, or for the active period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown explicit period.
    pub async fn allocation(
        &self,
        employee_id: EmployeeId,
        period_id: Option<ExercisePeriodId>,
    ) -> Result<Option<Allocation>, LeaveError> {
        match resolve_period_in(&self.db, period_id).await? {
            Some(period) => allocation_in(&self.db, employee_id, period.id).await,
            None => Ok(None),
        }
    }

    /// Approved consuming days inside the period. Zero without a period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown explicit period.
    pub async fn consumed_days(
        &self,
        employee_id: EmployeeId,
        period_id: Option<ExercisePeriodId>,
    ) -> Result<i32, LeaveError> {
        Ok(self.balance(employee_id, period_id).await?.consumed)
    }

    /// Balance snapshot for `period_id`, or for the active period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown explicit period.
    pub async fn balance(
        &self,
        employee_id: EmployeeId,
        period_id: Option<ExercisePeriodId>,
    ) -> Result<Balance, LeaveError> {
        let period = resolve_period_in(&self.db, period_id).await?;
        balance_in(&self.db, employee_id, period.as_ref()).await
    }

    /// Whether `requested` days fit the active period's remaining balance.
    ///
    /// An `exclude`d request that is already approved has its days added
    /// back first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn has_sufficient_balance(
        &self,
        employee_id: EmployeeId,
        requested: i32,
        exclude: Option<LeaveRequestId>,
    ) -> Result<bool, LeaveError> {
        Ok(balance_check_in(&self.db, employee_id, requested, exclude)
            .await?
            .is_sufficient())
    }

    /// Sets the employee's allocation for the active period, creating the
    /// row on first edit. Omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if absent
    /// - `NoActivePeriod` when no period is active
    /// - `NegativeAllocation` for a negative value
    pub async fn set_allocation(
        &self,
        employee_id: EmployeeId,
        update: AllocationUpdate,
    ) -> Result<Allocation, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        lock_employee_in(&txn, employee_id).await?;
        let period = active_period_in(&txn)
            .await?
            .ok_or(LeaveError::NoActivePeriod)?;
        let days = update.resolve(period.default_allocated_days)?;

        let existing = allocations::Entity::find()
            .filter(allocations::Column::EmployeeId.eq(employee_id.into_inner()))
            .filter(allocations::Column::PeriodId.eq(period.id))
            .one(&txn)
            .await
            .map_err(db_err)?;

        let saved = match existing {
            Some(row) => {
                let mut active: allocations::ActiveModel = row.into();
                active.days_allocated = Set(days.days_allocated);
                active.days_seniority = Set(days.days_seniority);
                active.days_carry_over = Set(days.days_carry_over);
                active.update(&txn).await.map_err(db_err)?
            }
            None => allocations::ActiveModel {
                id: Set(Uuid::now_v7()),
                employee_id: Set(employee_id.into_inner()),
                period_id: Set(period.id),
                days_allocated: Set(days.days_allocated),
                days_seniority: Set(days.days_seniority),
                days_carry_over: Set(days.days_carry_over),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?,
        };

        txn.commit().await.map_err(db_err)?;

        tracing::info!(
            employee_id = %employee_id,
            period_id = %saved.period_id,
            total = days.total(),
            "Allocation saved"
        );
        Ok(to_allocation(&saved))
    }
}

/// Explicit period if given, else the active one.
pub(crate) async fn resolve_period_in<C: ConnectionTrait>(
    conn: &C,
    period_id: Option<ExercisePeriodId>,
) -> Result<Option<ExercisePeriod>, LeaveError> {
    let model = match period_id {
        Some(id) => Some(find_period_in(conn, id).await?),
        None => active_period_in(conn).await?,
    };
    Ok(model.as_ref().map(to_period))
}

async fn allocation_in<C: ConnectionTrait>(
    conn: &C,
    employee_id: EmployeeId,
    period_id: ExercisePeriodId,
) -> Result<Option<Allocation>, LeaveError> {
    let row = allocations::Entity::find()
        .filter(allocations::Column::EmployeeId.eq(employee_id.into_inner()))
        .filter(allocations::Column::PeriodId.eq(period_id.into_inner()))
        .one(conn)
        .await
        .map_err(db_err)?;
    Ok(row.as_ref().map(to_allocation))
}

pub(crate) async fn balance_in<C: ConnectionTrait>(
    conn: &C,
    employee_id: EmployeeId,
    period: Option<&ExercisePeriod>,
) -> Result<Balance, LeaveError> {
    let Some(period) = period else {
        return Ok(Balance::zero());
    };

    let consuming: Vec<DbLeaveType> = LeaveType::ALL
        .into_iter()
        .filter(LeaveType::consumes_balance)
        .map(Into::into)
        .collect();

    let rows = leave_requests::Entity::find()
        .filter(leave_requests::Column::EmployeeId.eq(employee_id.into_inner()))
        .filter(leave_requests::Column::Status.eq(DbLeaveStatus::from(LeaveStatus::Approved)))
        .filter(leave_requests::Column::LeaveType.is_in(consuming))
        .filter(leave_requests::Column::StartDate.gte(period.start_date))
        .filter(leave_requests::Column::EndDate.lte(period.end_date))
        .all(conn)
        .await
        .map_err(db_err)?;
    let records: Vec<_> = rows.iter().map(to_record).collect();

    let allocation = allocation_in(conn, employee_id, period.id).await?;
    Ok(compute_balance(
        allocation.as_ref().map(|a| &a.days),
        &records,
        Some(period),
    ))
}

/// Remaining versus requested days against the active period.
pub(crate) async fn balance_check_in<C: ConnectionTrait>(
    conn: &C,
    employee_id: EmployeeId,
    requested: i32,
    exclude: Option<LeaveRequestId>,
) -> Result<BalanceCheck, LeaveError> {
    let period = active_period_in(conn).await?.as_ref().map(to_period);
    let balance = balance_in(conn, employee_id, period.as_ref()).await?;

    // A vanished request has nothing to give back
    let excluded = match exclude {
        Some(id) => leave_requests::Entity::find_by_id(id.into_inner())
            .one(conn)
            .await
            .map_err(db_err)?
            .as_ref()
            .map(to_record),
        None => None,
    };

    Ok(BalanceCheck {
        remaining: balance.remaining_excluding(excluded.as_ref()),
        requested,
    })
}
