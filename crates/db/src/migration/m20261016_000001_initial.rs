//! Initial schema: employees, exercise periods, allocations, holidays and
//! leave requests.
//!
//! Built with the schema builder so the same migration runs on PostgreSQL
//! and SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Employees::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Employees::FirstName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Employees::Login)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(Employees::Role).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Employees::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Employees::HireDate).date().null())
                    .col(ColumnDef::new(Employees::Email).string_len(255).null())
                    .col(ColumnDef::new(Employees::ManagerId).uuid().null())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_manager")
                            .from(Employees::Table, Employees::ManagerId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_manager")
                    .table(Employees::Table)
                    .col(Employees::ManagerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExercisePeriods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExercisePeriods::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExercisePeriods::StartDate).date().not_null())
                    .col(ColumnDef::new(ExercisePeriods::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(ExercisePeriods::DefaultAllocatedDays)
                            .integer()
                            .not_null()
                            .default(25),
                    )
                    .col(
                        ColumnDef::new(ExercisePeriods::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Allocations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Allocations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Allocations::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Allocations::PeriodId).uuid().not_null())
                    .col(
                        ColumnDef::new(Allocations::DaysAllocated)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Allocations::DaysSeniority)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Allocations::DaysCarryOver)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_allocations_employee")
                            .from(Allocations::Table, Allocations::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_allocations_period")
                            .from(Allocations::Table, Allocations::PeriodId)
                            .to(ExercisePeriods::Table, ExercisePeriods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_allocations_employee_period")
                    .table(Allocations::Table)
                    .col(Allocations::EmployeeId)
                    .col(Allocations::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Holidays::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Holidays::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Holidays::Date).date().not_null())
                    .col(ColumnDef::new(Holidays::Label).string_len(100).not_null())
                    .col(ColumnDef::new(Holidays::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Holidays::AutoGenerated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_holidays_date")
                    .table(Holidays::Table)
                    .col(Holidays::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LeaveRequests::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(LeaveRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(LeaveRequests::WorkingDaysCount)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::LeaveType).string_len(32).not_null())
                    .col(ColumnDef::new(LeaveRequests::Comment).text().null())
                    .col(ColumnDef::new(LeaveRequests::Status).string_len(32).not_null())
                    .col(ColumnDef::new(LeaveRequests::ApprovedByManagerId).uuid().null())
                    .col(
                        ColumnDef::new(LeaveRequests::ApprovedByManagerAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::ApprovedById).uuid().null())
                    .col(
                        ColumnDef::new(LeaveRequests::ApprovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::RejectionReason).text().null())
                    .col(
                        ColumnDef::new(LeaveRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_requests_employee")
                            .from(LeaveRequests::Table, LeaveRequests::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_requests_manager_approver")
                            .from(LeaveRequests::Table, LeaveRequests::ApprovedByManagerId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_requests_approver")
                            .from(LeaveRequests::Table, LeaveRequests::ApprovedById)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Overlap and balance lookups filter by employee and date range
        manager
            .create_index(
                Index::create()
                    .name("idx_leave_requests_employee_dates")
                    .table(LeaveRequests::Table)
                    .col(LeaveRequests::EmployeeId)
                    .col(LeaveRequests::StartDate)
                    .col(LeaveRequests::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leave_requests_status")
                    .table(LeaveRequests::Table)
                    .col(LeaveRequests::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeaveRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Holidays::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Allocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExercisePeriods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Employees {
    Table,
    Id,
    Name,
    FirstName,
    Login,
    PasswordHash,
    Role,
    IsActive,
    HireDate,
    Email,
    ManagerId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExercisePeriods {
    Table,
    Id,
    StartDate,
    EndDate,
    DefaultAllocatedDays,
    IsActive,
}

#[derive(DeriveIden)]
enum Allocations {
    Table,
    Id,
    EmployeeId,
    PeriodId,
    DaysAllocated,
    DaysSeniority,
    DaysCarryOver,
}

#[derive(DeriveIden)]
enum Holidays {
    Table,
    Id,
    Date,
    Label,
    Year,
    AutoGenerated,
}

#[derive(DeriveIden)]
pub(crate) enum LeaveRequests {
    Table,
    Id,
    EmployeeId,
    StartDate,
    EndDate,
    WorkingDaysCount,
    LeaveType,
    Comment,
    Status,
    ApprovedByManagerId,
    ApprovedByManagerAt,
    ApprovedById,
    ApprovedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}
