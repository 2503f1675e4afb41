use actix_web::{body, http::{header::ContentType, StatusCode}, HttpResponse};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

use crate::payroll::{
    generator::GenerateError,
    lifecycle::{AdjustmentError, TransitionError},
    period::PeriodError,
};

/// Everything a payroll page can fail with
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("database error")]
    Database(#[from] DbErr),
    #[error("payroll generation failed")]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Period(#[from] PeriodError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Adjustment(#[from] AdjustmentError),
    #[error("payroll record not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
}

impl actix_web::error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        if let ApiError::Database(err) = self {
            error!(error = %err, "Database error");
        }
        if let ApiError::Generate(GenerateError::Store(err)) = self {
            error!(error = %err, "Payroll generation aborted");
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Database(_) | ApiError::Generate(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Period(_) | ApiError::Transition(_) | ApiError::Adjustment(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}
