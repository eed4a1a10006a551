//! Shared setup for database integration tests.
//!
//! Every test gets its own in-memory SQLite database. The pool is pinned to
//! one connection so that all queries see the same database. Tests that need
//! real concurrent writers use a file-backed database through [`FileDb`].

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use leavedesk_core::leave::{LeaveDraft, LeaveType};
use leavedesk_core::ledger::AllocationUpdate;
use leavedesk_core::workflow::Role;
use leavedesk_db::entities::{employees, exercise_periods};
use leavedesk_db::migration::Migrator;
use leavedesk_db::{
    EmployeeRepository, ExerciseRepository, HolidayRepository, InAppNotifier,
    LeaveWorkflowRepository, LedgerRepository, NewEmployee, PeriodInput,
};
use leavedesk_shared::types::{EmployeeId, ExercisePeriodId};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// A throwaway SQLite file served by a pool of several connections.
pub struct FileDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl FileDb {
    pub async fn new(connections: u32) -> Self {
        let path = std::env::temp_dir().join(format!("leavedesk-{}.db", uuid::Uuid::new_v4()));
        let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
        options
            .max_connections(connections)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options)
            .await
            .expect("Failed to open file database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        Self { db, path }
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn hire(
    db: &DatabaseConnection,
    login: &str,
    role: Role,
    manager: Option<EmployeeId>,
) -> employees::Model {
    EmployeeRepository::new(db.clone())
        .create_employee(NewEmployee {
            name: login.to_uppercase(),
            first_name: login.to_string(),
            login: login.to_string(),
            password_hash: "hash".to_string(),
            role,
            email: Some(format!("{login}@example.com")),
            hire_date: None,
            manager_id: manager,
        })
        .await
        .expect("Failed to create employee")
}

pub fn id_of(model: &employees::Model) -> EmployeeId {
    EmployeeId::from_uuid(model.id)
}

pub fn draft(
    employee: &employees::Model,
    start: NaiveDate,
    end: NaiveDate,
    leave_type: LeaveType,
) -> LeaveDraft {
    LeaveDraft {
        employee_id: id_of(employee),
        start_date: start,
        end_date: end,
        leave_type,
        comment: None,
    }
}

/// A 2025 exercise with its holidays loaded and a small team.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub hr: employees::Model,
    pub manager: employees::Model,
    /// Reports to `manager`, 25 days allocated.
    pub employee: employees::Model,
    /// No manager, 25 days allocated.
    pub solo: employees::Model,
    pub period: exercise_periods::Model,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::on(setup_db().await).await
    }

    pub async fn on(db: DatabaseConnection) -> Self {
        let exercises = ExerciseRepository::new(db.clone());
        let period = exercises
            .create_period(PeriodInput {
                start_date: date(2025, 1, 1),
                end_date: date(2025, 12, 31),
                default_allocated_days: Some(25),
            })
            .await
            .unwrap();
        let period = exercises
            .activate_period(exercise_period_id(&period))
            .await
            .unwrap();

        HolidayRepository::new(db.clone())
            .load_holidays_for_years(&[2025])
            .await
            .unwrap();

        let hr = hire(&db, "hr", Role::Hr, None).await;
        let manager = hire(&db, "manager", Role::Manager, None).await;
        let employee = hire(&db, "employee", Role::Employee, Some(id_of(&manager))).await;
        let solo = hire(&db, "solo", Role::Employee, None).await;

        let ledger = LedgerRepository::new(db.clone());
        for member in [&employee, &solo] {
            ledger
                .set_allocation(id_of(member), AllocationUpdate::default())
                .await
                .unwrap();
        }

        Self {
            db,
            hr,
            manager,
            employee,
            solo,
            period,
        }
    }

    pub fn workflow(&self) -> LeaveWorkflowRepository {
        LeaveWorkflowRepository::new(self.db.clone(), Arc::new(InAppNotifier::new(self.db.clone())))
    }

    pub fn ledger(&self) -> LedgerRepository {
        LedgerRepository::new(self.db.clone())
    }
}

pub fn exercise_period_id(model: &exercise_periods::Model) -> ExercisePeriodId {
    ExercisePeriodId::from_uuid(model.id)
}
