use std::ops::Deref;

use actix_web::{body, dev, http::{self, header::ContentType, StatusCode}, web, FromRequest, HttpRequest, HttpResponse};
use chrono::{Duration, Local};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::{employee, sea_orm_active_enums::RoleType};

/// Issues and checks the bearer tokens handed out at login
pub struct Authority {
    jwt_key: (EncodingKey, DecodingKey),
}

impl Authority {
    pub fn new(jwt_key: &[u8]) -> Self {
        Self {
            jwt_key: (EncodingKey::from_secret(jwt_key), DecodingKey::from_secret(jwt_key))
        }
    }

    /// Issue a token for specified employee with 1 week of expiration time
    pub fn issue_for(&self, employee: &employee::Model) -> Result<String, AuthError> {
        let claims = Claims {
            exp: (Local::now() + Duration::weeks(1)).timestamp(),
            data: Session::from(employee),
        };

        Ok(encode(&Header::default(), &claims, &self.jwt_key.0)?)
    }

    pub fn authorize(&self, token: impl AsRef<str>) -> Result<Session, AuthError> {
        let payload = decode::<Claims<Session>>(token.as_ref(), &self.jwt_key.1, &Validation::default())?;

        Ok(payload.claims.data)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims<T> {
    exp: i64,
    data: T,
}

/// Who is calling, as carried inside the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub username: String,
    pub role: RoleType,
}

impl From<&employee::Model> for Session {
    fn from(employee: &employee::Model) -> Self {
        Self {
            id: employee.id,
            username: employee.username.clone(),
            role: employee.role,
        }
    }
}

impl Session {
    pub fn can_operate_payroll(&self) -> bool {
        matches!(self.role, RoleType::Admin | RoleType::Hr)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authority error")]
    AuthorityError(#[from] jsonwebtoken::errors::Error),
}

impl actix_web::error::ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> http::StatusCode {
        match self {
            AuthError::AuthorityError(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // Takes whatever follows the scheme, e.g. `Bearer <token>`
            let Some(Ok(Some((_, token)))) = req.headers()
                .get("Authorization")
                .map(|v|
                    v.to_str()
                        .map(|str| str.split_once(" "))
                )
            else {
                return Err(actix_web::error::ErrorUnauthorized("unauthorized"))
            };

            let Some(authority) = req.app_data::<web::Data<Authority>>() else {
                return Err(actix_web::error::ErrorInternalServerError("authority is not configured"))
            };
            let session = authority.authorize(token)?;

            Ok(session)
        })
    }
}

/// An admin or HR session, allowed to generate and manage payroll
pub struct PayrollOperator(pub Session);

impl Deref for PayrollOperator {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for PayrollOperator {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let session = Session::from_request(&req, &mut dev::Payload::None).await?;

            if !session.can_operate_payroll() {
                return Err(actix_web::error::ErrorForbidden("forbidden"))
            }

            Ok(Self(session))
        })
    }
}
