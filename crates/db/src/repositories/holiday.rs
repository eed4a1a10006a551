//! Holiday repository: public-holiday loading and working-day counts.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use leavedesk_core::LeaveError;
use leavedesk_core::calendar::{count_working_days, holidays_for_year};
use leavedesk_shared::types::HolidayId;

use crate::entities::holidays;

use super::conversions::db_err;
use super::exercise::active_period_in;

const DEFAULT_MANUAL_LABEL: &str = "Custom holiday";

/// Outcome of a bulk holiday load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows inserted.
    pub inserted: usize,
    /// Computed holidays skipped because the date was already present.
    pub skipped: usize,
}

/// Holiday repository.
#[derive(Debug, Clone)]
pub struct HolidayRepository {
    db: DatabaseConnection,
}

impl HolidayRepository {
    /// Creates a new holiday repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the computed public holidays of each year.
    ///
    /// Dates already present, manual or generated, are left untouched, so
    /// loading the same years twice is a no-op.
    ///
    /// # Errors
    ///
    /// - `Calendar` if a year is outside the supported range
    /// - `Database` if the transaction fails
    pub async fn load_holidays_for_years(&self, years: &[i32]) -> Result<LoadSummary, LeaveError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let mut summary = LoadSummary::default();

        for &year in years {
            let computed = holidays_for_year(year)?;
            let candidates: Vec<NaiveDate> = computed.iter().map(|h| h.date).collect();

            let mut present: BTreeSet<NaiveDate> = holidays::Entity::find()
                .select_only()
                .column(holidays::Column::Date)
                .filter(holidays::Column::Date.is_in(candidates))
                .into_tuple::<NaiveDate>()
                .all(&txn)
                .await
                .map_err(db_err)?
                .into_iter()
                .collect();

            for holiday in computed {
                // Two movable feasts can land on the same day (2008: Ascension = May 1)
                if !present.insert(holiday.date) {
                    summary.skipped += 1;
                    continue;
                }
                holidays::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    date: Set(holiday.date),
                    label: Set(holiday.label.to_string()),
                    year: Set(year),
                    auto_generated: Set(true),
                }
                .insert(&txn)
                .await
                .map_err(db_err)?;
                summary.inserted += 1;
            }
        }

        txn.commit().await.map_err(db_err)?;

        tracing::info!(
            years = ?years,
            inserted = summary.inserted,
            skipped = summary.skipped,
            "Public holidays loaded"
        );
        Ok(summary)
    }

    /// Loads the holidays of every year the active period spans.
    ///
    /// # Errors
    ///
    /// Returns `NoActivePeriod` when no period is active.
    pub async fn load_holidays_for_active_period(&self) -> Result<LoadSummary, LeaveError> {
        let period = active_period_in(&self.db)
            .await?
            .ok_or(LeaveError::NoActivePeriod)?;
        let years: Vec<i32> = (period.start_date.year()..=period.end_date.year()).collect();
        self.load_holidays_for_years(&years).await
    }

    /// Adds a holiday by hand. A blank label becomes "Custom holiday".
    ///
    /// # Errors
    ///
    /// Returns `HolidayExists` if the date is already a holiday.
    pub async fn add_manual_holiday(
        &self,
        date: NaiveDate,
        label: &str,
    ) -> Result<holidays::Model, LeaveError> {
        let existing = holidays::Entity::find()
            .filter(holidays::Column::Date.eq(date))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        if existing > 0 {
            return Err(LeaveError::HolidayExists(date));
        }

        let label = match label.trim() {
            "" => DEFAULT_MANUAL_LABEL.to_string(),
            trimmed => trimmed.to_string(),
        };

        let holiday = holidays::ActiveModel {
            id: Set(Uuid::now_v7()),
            date: Set(date),
            label: Set(label),
            year: Set(date.year()),
            auto_generated: Set(false),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        tracing::info!(date = %date, label = %holiday.label, "Manual holiday added");
        Ok(holiday)
    }

    /// Deletes a holiday.
    ///
    /// # Errors
    ///
    /// Returns `HolidayNotFound` if no row has that id.
    pub async fn remove_holiday(&self, id: HolidayId) -> Result<(), LeaveError> {
        let result = holidays::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(LeaveError::HolidayNotFound(id));
        }
        Ok(())
    }

    /// Holidays of the given years, ordered by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn holidays_for_years(&self, years: &[i32]) -> Result<Vec<holidays::Model>, LeaveError> {
        holidays::Entity::find()
            .filter(holidays::Column::Year.is_in(years.iter().copied()))
            .order_by_asc(holidays::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Holiday dates inside `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn holiday_dates_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeSet<NaiveDate>, LeaveError> {
        holiday_dates_in(&self.db, start, end).await
    }

    /// Working days in `[start, end]` against the stored holidays.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_working_days(&self, start: NaiveDate, end: NaiveDate) -> Result<i32, LeaveError> {
        count_working_days_in(&self.db, start, end).await
    }
}

pub(crate) async fn holiday_dates_in<C: ConnectionTrait>(
    conn: &C,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BTreeSet<NaiveDate>, LeaveError> {
    let dates = holidays::Entity::find()
        .select_only()
        .column(holidays::Column::Date)
        .filter(holidays::Column::Date.between(start, end))
        .into_tuple::<NaiveDate>()
        .all(conn)
        .await
        .map_err(db_err)?;
    Ok(dates.into_iter().collect())
}

/// Counts working days, fetching holidays by date range so that ranges
/// crossing a year boundary see both years.
pub(crate) async fn count_working_days_in<C: ConnectionTrait>(
    conn: &C,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<i32, LeaveError> {
    if end < start {
        return Ok(0);
    }
    let holidays = holiday_dates_in(conn, start, end).await?;
    Ok(count_working_days(start, end, &holidays))
}
