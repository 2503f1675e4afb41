use std::ops::Deref;

use actix_web::{http::header, HttpMessage as _};

use super::*;

/// No body at all, or an explicit `Content-Length: 0`
fn has_empty_body(req: &HttpRequest) -> bool {
    let headers = req.headers();

    match headers.get(header::CONTENT_LENGTH) {
        Some(length) => length.to_str().is_ok_and(|length| length.trim() == "0"),
        None => !headers.contains_key(header::TRANSFER_ENCODING) && !headers.contains_key(header::CONTENT_TYPE),
    }
}

/// Reads a JSON or urlencoded body; only a missing body falls back to the
/// current period, a body that fails to parse is rejected
impl FromRequest for GeneratePayroll {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut dev::Payload) -> Self::Future {
        if has_empty_body(req) {
            return Box::pin(async { Ok(Self::default()) });
        }

        if req.content_type() == "application/x-www-form-urlencoded" {
            let form = web::Form::<Self>::from_request(req, payload);

            Box::pin(async move {
                form.await
                    .map(web::Form::into_inner)
                    .map_err(|err| actix_web::error::ErrorBadRequest(err.to_string()))
            })
        } else {
            let json = web::Json::<Self>::from_request(req, payload);

            Box::pin(async move {
                json.await
                    .map(web::Json::into_inner)
                    .map_err(|err| actix_web::error::ErrorBadRequest(err.to_string()))
            })
        }
    }
}

impl FromRequest for payroll_record::Model {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let Some(payroll_id) = req.match_info().get("payroll_id") else {
                return Err(actix_web::error::ErrorInternalServerError("route has no `payroll_id` segment"))
            };
            let Ok(payroll_id) = Uuid::from_str(payroll_id) else {
                return Err(actix_web::error::ErrorBadRequest("invalid `payroll_id`"))
            };

            let Some(db) = req.app_data::<web::Data<DatabaseConnection>>() else {
                return Err(actix_web::error::ErrorInternalServerError("database is not configured"))
            };

            let Some(record) = PayrollRecord::find_by_id(payroll_id)
                .one(db.as_ref()).await.map_err(ApiError::from)?
            else {
                return Err(ApiError::NotFound.into())
            };

            Ok(record)
        })
    }
}

/// A payroll record that is neither paid nor cancelled
pub(super) struct EditablePayroll(pub(super) payroll_record::Model);

impl Deref for EditablePayroll {
    type Target = payroll_record::Model;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for EditablePayroll {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let record = payroll_record::Model::from_request(&req, &mut dev::Payload::None).await?;

            if record.status.is_terminal() {
                return Err(ApiError::from(AdjustmentError::Locked(record.status)).into());
            }

            Ok(Self(record))
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use chrono::Local;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::entity::{payroll_record::PayrollItems, sea_orm_active_enums::PayrollStatus};

    use super::*;

    fn record(status: PayrollStatus) -> payroll_record::Model {
        payroll_record::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            employee_id: Uuid::new_v4(),
            month: "03".to_string(),
            year: 2025,
            items: PayrollItems::default(),
            bonus_amount: Decimal::ZERO,
            deduction_amount: Decimal::ZERO,
            adjustment_note: None,
            total_amount: Decimal::ZERO,
            status,
        }
    }

    #[actix_web::test]
    async fn test_payroll_extractor() {
        #[get("/{payroll_id}")]
        async fn test_handler(record: payroll_record::Model) -> impl Responder {
            web::Json(record)
        }

        let record = record(PayrollStatus::Generated);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ record.clone() ],
                vec![ ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.into_connection()))
                .service(test_handler)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/{}", record.id))
            .to_request();

        let returned_record: payroll_record::Model = test::call_and_read_body_json(&app, req).await;
        assert_eq!(returned_record, record);

        let req = test::TestRequest::default()
            .uri(&format!("/{}", Uuid::new_v4()))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::default()
            .uri("/not-a-uuid")
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_editable_payroll_extractor() {
        #[get("/{payroll_id}")]
        async fn test_handler(record: EditablePayroll) -> impl Responder {
            web::Json(record.0)
        }

        let generated = record(PayrollStatus::Generated);
        let approved = record(PayrollStatus::Approved);
        let paid = record(PayrollStatus::Paid);
        let cancelled = record(PayrollStatus::Cancelled);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ generated.clone() ],
                vec![ approved.clone() ],
                vec![ paid.clone() ],
                vec![ cancelled.clone() ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.into_connection()))
                .service(test_handler)
        ).await;

        for editable in [&generated, &approved] {
            let req = test::TestRequest::default()
                .uri(&format!("/{}", editable.id))
                .to_request();

            let returned_record: payroll_record::Model = test::call_and_read_body_json(&app, req).await;
            assert_eq!(&returned_record, editable);
        }

        for locked in [&paid, &cancelled] {
            let req = test::TestRequest::default()
                .uri(&format!("/{}", locked.id))
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
