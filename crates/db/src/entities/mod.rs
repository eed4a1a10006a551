//! `SeaORM` entity definitions.
//!
//! Models mirror the tables created by the migrations.

#![allow(missing_docs)]

pub mod allocations;
pub mod employees;
pub mod exercise_periods;
pub mod holidays;
pub mod leave_requests;
pub mod notifications;
pub mod sea_orm_active_enums;
