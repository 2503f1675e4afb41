use rust_decimal::Decimal;

use crate::entity::sea_orm_active_enums::PayrollStatus;

use super::*;

/// Both fields fall back to the current month and year
#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct GeneratePayroll {
    pub(super) month: Option<String>,
    pub(super) year: Option<i32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct ListPayroll {
    pub(super) month: Option<String>,
    pub(super) year: Option<i32>,
    pub(super) employee_id: Option<Uuid>,
    pub(super) status: Option<PayrollStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct AdjustPayroll {
    #[serde(default)]
    pub(super) bonus_amount: Decimal,
    #[serde(default)]
    pub(super) deduction_amount: Decimal,
    pub(super) adjustment_note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct UpdatePayrollStatus {
    pub(super) status: PayrollStatus,
}
