//! In-app notifications.

use sea_orm_migration::prelude::*;

use super::m20261016_000001_initial::{Employees, LeaveRequests};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Notifications::Category).string_len(32).not_null())
                    .col(ColumnDef::new(Notifications::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Notifications::Body).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::LeaveRequestId).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_employee")
                            .from(Notifications::Table, Notifications::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_leave_request")
                            .from(Notifications::Table, Notifications::LeaveRequestId)
                            .to(LeaveRequests::Table, LeaveRequests::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Inbox listing: newest first per recipient
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_employee_created")
                    .table(Notifications::Table)
                    .col(Notifications::EmployeeId)
                    .col(Notifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    EmployeeId,
    Category,
    Title,
    Body,
    IsRead,
    CreatedAt,
    LeaveRequestId,
}
