//! Database seeder for Leavedesk development and testing.
//!
//! Runs pending migrations, then seeds an active exercise period for the
//! current year, its public holidays, and a three-person team (HR, a
//! manager and one report) with default allocations. Safe to run twice.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leavedesk_core::ledger::AllocationUpdate;
use leavedesk_core::workflow::Role;
use leavedesk_db::entities::employees;
use leavedesk_db::migration::Migrator;
use leavedesk_db::{
    EmployeeRepository, ExerciseRepository, HolidayRepository, LedgerRepository, NewEmployee,
    PeriodInput,
};
use leavedesk_shared::AppConfig;
use leavedesk_shared::types::EmployeeId;

/// Placeholder hash; real hashes come from the authentication layer.
const SEED_PASSWORD_HASH: &str = "$argon2id$v=19$m=65536,t=3,p=4$seed_hash";

struct SeedEmployee {
    login: &'static str,
    first_name: &'static str,
    name: &'static str,
    role: Role,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leavedesk=debug,seeder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = leavedesk_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    let year = Utc::now().year();
    let exercises = ExerciseRepository::with_policy(db.clone(), config.leave.clone());
    let period = match exercises.active_period().await? {
        Some(period) => {
            info!(period_id = %period.id, "Active period already configured, skipping");
            period
        }
        None => {
            let start = NaiveDate::from_ymd_opt(year, 1, 1).context("Invalid year")?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31).context("Invalid year")?;
            exercises
                .save_active_period(PeriodInput {
                    start_date: start,
                    end_date: end,
                    default_allocated_days: None,
                })
                .await?
        }
    };
    info!(start = %period.start_date, end = %period.end_date, "Exercise period ready");

    let loaded = HolidayRepository::new(db.clone())
        .load_holidays_for_active_period()
        .await?;
    info!(inserted = loaded.inserted, skipped = loaded.skipped, "Holidays seeded");

    let staff = EmployeeRepository::new(db.clone());
    let hr = seed_employee(
        &staff,
        &SeedEmployee {
            login: "hr",
            first_name: "Claire",
            name: "Martin",
            role: Role::Hr,
        },
        None,
    )
    .await?;
    let manager = seed_employee(
        &staff,
        &SeedEmployee {
            login: "manager",
            first_name: "Paul",
            name: "Bernard",
            role: Role::Manager,
        },
        None,
    )
    .await?;
    let employee = seed_employee(
        &staff,
        &SeedEmployee {
            login: "employee",
            first_name: "Julie",
            name: "Petit",
            role: Role::Employee,
        },
        Some(EmployeeId::from_uuid(manager.id)),
    )
    .await?;

    let ledger = LedgerRepository::new(db);
    for member in [&hr, &manager, &employee] {
        let id = EmployeeId::from_uuid(member.id);
        if ledger.allocation(id, None).await?.is_none() {
            ledger.set_allocation(id, AllocationUpdate::default()).await?;
        }
    }

    info!("Seeding complete");
    Ok(())
}

async fn seed_employee(
    staff: &EmployeeRepository,
    seed: &SeedEmployee,
    manager_id: Option<EmployeeId>,
) -> anyhow::Result<employees::Model> {
    if let Some(existing) = staff.find_by_login(seed.login).await? {
        info!(login = seed.login, "Employee already exists, skipping");
        return Ok(existing);
    }

    let created = staff
        .create_employee(NewEmployee {
            name: seed.name.to_string(),
            first_name: seed.first_name.to_string(),
            login: seed.login.to_string(),
            password_hash: SEED_PASSWORD_HASH.to_string(),
            role: seed.role,
            email: Some(format!("{}@leavedesk.local", seed.login)),
            hire_date: None,
            manager_id,
        })
        .await?;
    info!(login = seed.login, role = %seed.role, "Employee created");
    Ok(created)
}
