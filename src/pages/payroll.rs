use std::str::FromStr;

use actix_web::{delete, dev, get, patch, post, web, FromRequest, HttpRequest, HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use futures_util::future::LocalBoxFuture;
use sea_orm::{ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{PayrollOperator, Session},
    entity::{payroll_record, prelude::*},
    pages::ApiError,
    payroll::{
        generator::PayrollGenerator,
        lifecycle::{self, Adjustment, AdjustmentError},
        period::{self, PayPeriod, PeriodError},
        proration::WorkingDayPolicy,
    },
};

use extractor::EditablePayroll;
use model::*;

mod extractor;
mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(generate_payroll)
        .service(list_payroll)
        .service(get_payroll)
        .service(adjust_payroll)
        .service(update_payroll_status)
        .service(delete_payroll);
}

/// Fills in whatever the request left out from `today`
fn resolve_period(request: GeneratePayroll, today: NaiveDate) -> Result<PayPeriod, PeriodError> {
    let current = PayPeriod::containing(today);
    let year = request.year.unwrap_or(current.year());

    match request.month {
        Some(month) if !month.trim().is_empty() => PayPeriod::parse(&month, year),
        _ => PayPeriod::new(current.month(), year),
    }
}

#[post("/generate")]
async fn generate_payroll(
    db: web::Data<DatabaseConnection>,
    operator: PayrollOperator,
    working_days: web::Data<WorkingDayPolicy>,
    request: GeneratePayroll,
) -> Result<impl Responder, ApiError> {
    let period = resolve_period(request, Local::now().date_naive())?;

    info!(operator_id = %operator.id, %period, "Payroll generation requested");

    let summary = PayrollGenerator::new(db.get_ref(), *working_days.get_ref())
        .generate(period, Some(operator.id))
        .await?;

    Ok(web::Json(summary))
}

#[get("")]
async fn list_payroll(db: web::Data<DatabaseConnection>, _operator: PayrollOperator, query: web::Query<ListPayroll>) -> Result<impl Responder, ApiError> {
    let mut select = PayrollRecord::find();

    if let Some(month) = &query.month {
        select = select.filter(payroll_record::Column::Month.eq(period::normalize_month(month)?));
    }
    if let Some(year) = query.year {
        select = select.filter(payroll_record::Column::Year.eq(year));
    }
    if let Some(employee_id) = query.employee_id {
        select = select.filter(payroll_record::Column::EmployeeId.eq(employee_id));
    }
    if let Some(status) = query.status {
        select = select.filter(payroll_record::Column::Status.eq(status));
    }

    let records = select
        .order_by_desc(payroll_record::Column::Year)
        .order_by_desc(payroll_record::Column::Month)
        .order_by_asc(payroll_record::Column::CreatedAt)
        .all(db.as_ref()).await?;

    Ok(web::Json(records))
}

/// Operators see every record, employees only their own
#[get("/{payroll_id}")]
async fn get_payroll(session: Session, record: payroll_record::Model) -> Result<impl Responder, ApiError> {
    if !session.can_operate_payroll() && record.employee_id != session.id {
        return Err(ApiError::Forbidden);
    }

    Ok(web::Json(record))
}

#[patch("/{payroll_id}/adjustment")]
async fn adjust_payroll(
    db: web::Data<DatabaseConnection>,
    operator: PayrollOperator,
    record: EditablePayroll,
    payload: web::Json<AdjustPayroll>,
) -> Result<impl Responder, ApiError> {
    let payload = payload.into_inner();

    let totals = lifecycle::apply_adjustment(&record, Adjustment {
        bonus_amount: payload.bonus_amount,
        deduction_amount: payload.deduction_amount,
        adjustment_note: payload.adjustment_note,
    })?;

    let model = PayrollRecord::update(payroll_record::ActiveModel {
        id: Unchanged(record.id),
        updated_at: Set(Local::now().fixed_offset()),
        updated_by: Set(Some(operator.id)),
        bonus_amount: Set(totals.bonus_amount),
        deduction_amount: Set(totals.deduction_amount),
        adjustment_note: Set(totals.adjustment_note),
        total_amount: Set(totals.total_amount),
        ..Default::default()
    }).exec(db.as_ref()).await?;

    info!(payroll_id = %model.id, operator_id = %operator.id, total_amount = %model.total_amount, "Payroll adjusted");

    Ok(web::Json(model))
}

#[post("/{payroll_id}/status")]
async fn update_payroll_status(
    db: web::Data<DatabaseConnection>,
    operator: PayrollOperator,
    record: payroll_record::Model,
    payload: web::Json<UpdatePayrollStatus>,
) -> Result<impl Responder, ApiError> {
    let status = lifecycle::transition(record.status, payload.status)?;

    let model = PayrollRecord::update(payroll_record::ActiveModel {
        id: Unchanged(record.id),
        updated_at: Set(Local::now().fixed_offset()),
        updated_by: Set(Some(operator.id)),
        status: Set(status),
        ..Default::default()
    }).exec(db.as_ref()).await?;

    info!(payroll_id = %model.id, operator_id = %operator.id, from = ?record.status, to = ?status, "Payroll status changed");

    Ok(web::Json(model))
}

#[delete("/{payroll_id}")]
async fn delete_payroll(db: web::Data<DatabaseConnection>, operator: PayrollOperator, record: EditablePayroll) -> Result<impl Responder, ApiError> {
    PayrollRecord::delete_by_id(record.id)
        .exec(db.as_ref()).await?;

    info!(payroll_id = %record.id, operator_id = %operator.id, "Payroll deleted");

    Ok(HttpResponse::NoContent().finish())
}
