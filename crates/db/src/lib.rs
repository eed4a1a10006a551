//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! Every state-changing repository method runs inside one database
//! transaction. Request and employee rows are locked with
//! `SELECT ... FOR UPDATE` on PostgreSQL. On SQLite the same helpers open
//! with a no-op write so the transaction holds the write lock from its first
//! statement.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    EmployeeRepository, ExerciseRepository, HolidayRepository, InAppNotifier, LeaveEdit,
    LeaveRepository, LeaveWorkflowRepository, LedgerRepository, NewEmployee,
    NotificationRepository, PeriodInput, ReportRepository,
};

use leavedesk_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .sqlx_logging(false);

    tracing::debug!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Connecting to database"
    );
    Database::connect(options).await
}
