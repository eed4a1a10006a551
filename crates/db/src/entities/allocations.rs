//! `SeaORM` Entity for allocations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "allocations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub period_id: Uuid,
    pub days_allocated: i32,
    pub days_seniority: i32,
    pub days_carry_over: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id",
        on_delete = "Cascade"
    )]
    Employees,
    #[sea_orm(
        belongs_to = "super::exercise_periods::Entity",
        from = "Column::PeriodId",
        to = "super::exercise_periods::Column::Id",
        on_delete = "Cascade"
    )]
    ExercisePeriods,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::exercise_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExercisePeriods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
