//! Employees who log in and get paid

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::RoleType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text", unique)]
    pub username: String,
    #[serde(skip)]
    pub password: Vec<u8>,
    #[sea_orm(column_type = "Text")]
    pub full_name: String,
    pub role: RoleType,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::leave_record::Entity")]
    LeaveRecord,
    #[sea_orm(has_many = "super::payroll_record::Entity")]
    PayrollRecord,
    #[sea_orm(has_many = "super::payroll_setting::Entity")]
    PayrollSetting,
}

impl Related<super::leave_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRecord.def()
    }
}

impl Related<super::payroll_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollRecord.def()
    }
}

impl Related<super::payroll_setting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollSetting.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
