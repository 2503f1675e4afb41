//! Persistence seams the payroll generator reads from and writes to.
//!
//! Every trait is implemented for [`DatabaseConnection`]; tests swap in an
//! in-memory implementation.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::OnConflict, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::{
        employee, leave_record,
        payroll_record::{self, PayrollItems},
        payroll_setting,
        prelude::*,
        sea_orm_active_enums::{LeaveStatus, PayrollStatus},
    },
    payroll::period::PayPeriod,
};

pub trait EmployeeDirectory {
    async fn find_active_employees(&self) -> Result<Vec<employee::Model>, DbErr>;
}

pub trait PayrollSettingsStore {
    /// Active settings of `employee_id` whose effective range touches `period`
    async fn find_active_settings(
        &self,
        employee_id: Uuid,
        period: &PayPeriod,
    ) -> Result<Vec<payroll_setting::Model>, DbErr>;
}

pub trait LeaveStore {
    async fn find_approved_overlapping(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<leave_record::Model>, DbErr>;
}

pub trait PayrollRecordStore {
    async fn exists(&self, employee_id: Uuid, period: &PayPeriod) -> Result<bool, DbErr>;

    /// Inserts `record`, reporting a clash on (employee, month, year) as
    /// [`CreateOutcome::AlreadyExists`] instead of an error
    async fn create(&self, record: NewPayrollRecord) -> Result<CreateOutcome, DbErr>;
}

/// A freshly generated payroll record, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayrollRecord {
    pub employee_id: Uuid,
    pub period: PayPeriod,
    pub items: PayrollItems,
    pub adjustment_note: Option<String>,
    pub total_amount: Decimal,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(payroll_record::Model),
    AlreadyExists,
}

impl EmployeeDirectory for DatabaseConnection {
    async fn find_active_employees(&self) -> Result<Vec<employee::Model>, DbErr> {
        Employee::find()
            .filter(employee::Column::Active.eq(true))
            .order_by_asc(employee::Column::CreatedAt)
            .all(self)
            .await
    }
}

impl PayrollSettingsStore for DatabaseConnection {
    async fn find_active_settings(
        &self,
        employee_id: Uuid,
        period: &PayPeriod,
    ) -> Result<Vec<payroll_setting::Model>, DbErr> {
        PayrollSetting::find()
            .filter(payroll_setting::Column::EmployeeId.eq(employee_id))
            .filter(payroll_setting::Column::IsActive.eq(true))
            .filter(payroll_setting::Column::EffectiveFrom.lte(period.end()))
            .filter(
                Condition::any()
                    .add(payroll_setting::Column::EffectiveUntil.is_null())
                    .add(payroll_setting::Column::EffectiveUntil.gte(period.start())),
            )
            .order_by_asc(payroll_setting::Column::CreatedAt)
            .all(self)
            .await
    }
}

impl LeaveStore for DatabaseConnection {
    async fn find_approved_overlapping(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<leave_record::Model>, DbErr> {
        LeaveRecord::find()
            .filter(leave_record::Column::EmployeeId.eq(employee_id))
            .filter(leave_record::Column::Status.eq(LeaveStatus::Approved))
            .filter(leave_record::Column::StartDate.lte(end))
            .filter(leave_record::Column::EndDate.gte(start))
            .all(self)
            .await
    }
}

impl PayrollRecordStore for DatabaseConnection {
    async fn exists(&self, employee_id: Uuid, period: &PayPeriod) -> Result<bool, DbErr> {
        let existing = PayrollRecord::find()
            .filter(payroll_record::Column::EmployeeId.eq(employee_id))
            .filter(payroll_record::Column::Month.eq(period.month_label()))
            .filter(payroll_record::Column::Year.eq(period.year()))
            .one(self)
            .await?;

        Ok(existing.is_some())
    }

    async fn create(&self, record: NewPayrollRecord) -> Result<CreateOutcome, DbErr> {
        let model = payroll_record::ActiveModel {
            created_at: Set(Local::now().fixed_offset()),
            updated_at: Set(Local::now().fixed_offset()),
            created_by: Set(record.created_by),
            updated_by: Set(record.created_by),
            employee_id: Set(record.employee_id),
            month: Set(record.period.month_label()),
            year: Set(record.period.year()),
            items: Set(record.items),
            bonus_amount: Set(Decimal::ZERO),
            deduction_amount: Set(Decimal::ZERO),
            adjustment_note: Set(record.adjustment_note),
            total_amount: Set(record.total_amount),
            status: Set(PayrollStatus::Generated),
            ..Default::default()
        };

        let inserted = PayrollRecord::insert(model)
            .on_conflict(
                OnConflict::columns([
                    payroll_record::Column::EmployeeId,
                    payroll_record::Column::Month,
                    payroll_record::Column::Year,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_with_returning(self)
            .await;

        match inserted {
            Ok(created) => Ok(CreateOutcome::Created(created)),
            Err(err) if is_period_conflict(&err) => Ok(CreateOutcome::AlreadyExists),
            Err(err) => Err(err),
        }
    }
}

/// `ON CONFLICT DO NOTHING` returns no row when another run already inserted
/// the record, which sea-orm reports as not found
fn is_period_conflict(err: &DbErr) -> bool {
    matches!(err, DbErr::RecordNotFound(_) | DbErr::RecordNotInserted)
        || matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
