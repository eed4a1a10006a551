//! Exercise period repository.
//!
//! At most one period is active. Activation flips the flag on the chosen
//! period and clears it everywhere else in the same transaction.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use leavedesk_core::LeaveError;
use leavedesk_core::ledger::validate_period;
use leavedesk_shared::LeavePolicyConfig;
use leavedesk_shared::types::ExercisePeriodId;

use crate::entities::exercise_periods;

use super::conversions::db_err;

/// Input for creating or editing a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodInput {
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
    /// Days granted by default. On creation `None` takes the policy
    /// default; on update it keeps the stored value.
    pub default_allocated_days: Option<i32>,
}

/// Exercise period repository.
#[derive(Debug, Clone)]
pub struct ExerciseRepository {
    db: DatabaseConnection,
    policy: LeavePolicyConfig,
}

impl ExerciseRepository {
    /// Creates a repository using the default leave policy.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_policy(db, LeavePolicyConfig::default())
    }

    /// Creates a repository with an explicit leave policy.
    #[must_use]
    pub const fn with_policy(db: DatabaseConnection, policy: LeavePolicyConfig) -> Self {
        Self { db, policy }
    }

    /// Creates an inactive period.
    ///
    /// # Errors
    ///
    /// - `InvalidPeriod` unless end is after start
    /// - `NegativeAllocation` for a negative default
    pub async fn create_period(&self, input: PeriodInput) -> Result<exercise_periods::Model, LeaveError> {
        insert_period_in(&self.db, &input, self.default_for(&input), false).await
    }

    /// Changes a period's dates and default allocation.
    ///
    /// # Errors
    ///
    /// - `PeriodNotFound` if absent
    /// - `InvalidPeriod` / `NegativeAllocation` on bad input
    pub async fn update_period(
        &self,
        id: ExercisePeriodId,
        input: PeriodInput,
    ) -> Result<exercise_periods::Model, LeaveError> {
        let period = find_period_in(&self.db, id).await?;
        update_period_in(&self.db, period, &input).await
    }

    /// Makes `id` the only active period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if absent.
    pub async fn activate_period(&self, id: ExercisePeriodId) -> Result<exercise_periods::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let period = find_period_in(&txn, id).await?;

        exercise_periods::Entity::update_many()
            .col_expr(exercise_periods::Column::IsActive, Expr::value(false))
            .filter(exercise_periods::Column::Id.ne(period.id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let mut active: exercise_periods::ActiveModel = period.into();
        active.is_active = Set(true);
        let updated = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        tracing::info!(
            period_id = %updated.id,
            start = %updated.start_date,
            end = %updated.end_date,
            "Exercise period activated"
        );
        Ok(updated)
    }

    /// The active period, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn active_period(&self) -> Result<Option<exercise_periods::Model>, LeaveError> {
        active_period_in(&self.db).await
    }

    /// Finds a period by ID.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if absent.
    pub async fn find_period(&self, id: ExercisePeriodId) -> Result<exercise_periods::Model, LeaveError> {
        find_period_in(&self.db, id).await
    }

    /// All periods, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_periods(&self) -> Result<Vec<exercise_periods::Model>, LeaveError> {
        exercise_periods::Entity::find()
            .order_by_desc(exercise_periods::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Updates the active period, or creates one and activates it when none
    /// is active.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` / `NegativeAllocation` on bad input.
    pub async fn save_active_period(&self, input: PeriodInput) -> Result<exercise_periods::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let saved = match active_period_in(&txn).await? {
            Some(period) => update_period_in(&txn, period, &input).await?,
            None => insert_period_in(&txn, &input, self.default_for(&input), true).await?,
        };

        txn.commit().await.map_err(db_err)?;

        tracing::info!(period_id = %saved.id, "Active exercise period saved");
        Ok(saved)
    }

    fn default_for(&self, input: &PeriodInput) -> i32 {
        input
            .default_allocated_days
            .unwrap_or(self.policy.default_allocated_days)
    }
}

async fn insert_period_in<C: ConnectionTrait>(
    conn: &C,
    input: &PeriodInput,
    default_allocated_days: i32,
    is_active: bool,
) -> Result<exercise_periods::Model, LeaveError> {
    validate_period(input.start_date, input.end_date, default_allocated_days)?;

    exercise_periods::ActiveModel {
        id: Set(Uuid::now_v7()),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        default_allocated_days: Set(default_allocated_days),
        is_active: Set(is_active),
    }
    .insert(conn)
    .await
    .map_err(db_err)
}

async fn update_period_in<C: ConnectionTrait>(
    conn: &C,
    period: exercise_periods::Model,
    input: &PeriodInput,
) -> Result<exercise_periods::Model, LeaveError> {
    let default_allocated_days = input
        .default_allocated_days
        .unwrap_or(period.default_allocated_days);
    validate_period(input.start_date, input.end_date, default_allocated_days)?;

    let mut active: exercise_periods::ActiveModel = period.into();
    active.start_date = Set(input.start_date);
    active.end_date = Set(input.end_date);
    active.default_allocated_days = Set(default_allocated_days);
    active.update(conn).await.map_err(db_err)
}

pub(crate) async fn active_period_in<C: ConnectionTrait>(
    conn: &C,
) -> Result<Option<exercise_periods::Model>, LeaveError> {
    exercise_periods::Entity::find()
        .filter(exercise_periods::Column::IsActive.eq(true))
        .one(conn)
        .await
        .map_err(db_err)
}

pub(crate) async fn find_period_in<C: ConnectionTrait>(
    conn: &C,
    id: ExercisePeriodId,
) -> Result<exercise_periods::Model, LeaveError> {
    exercise_periods::Entity::find_by_id(id.into_inner())
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or(LeaveError::PeriodNotFound(id))
}
