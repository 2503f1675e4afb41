//! Generated payroll with its line items stored as JSON

use sea_orm::{entity::prelude::*, FromJsonQueryResult};
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PaymentMethod, PayrollStatus, PayrollType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payroll_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub employee_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub month: String,
    pub year: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: PayrollItems,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub bonus_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub deduction_amount: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub adjustment_note: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub total_amount: Decimal,
    pub status: PayrollStatus,
}

/// Line items are stored inline with the record as a JSON array
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PayrollItems(pub Vec<PayrollItem>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollItem {
    pub setting_id: Uuid,
    pub description: String,
    pub payroll_type: PayrollType,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
}

impl PayrollItems {
    pub fn total(&self) -> Decimal {
        self.0.iter().map(|item| item.amount).sum()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
