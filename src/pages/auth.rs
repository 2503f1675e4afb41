use actix_web::{get, post, web, Responder};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::{auth::{Authority, Session}, entity::{employee, prelude::*}, pages::ApiError};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(login)
        .service(whoami);
}

#[derive(Debug, Serialize, Deserialize)]
struct Login {
    username: String,
    password: String,
}

#[post("/login")]
async fn login(db: web::Data<DatabaseConnection>, authority: web::Data<Authority>, credentials: web::Json<Login>) -> Result<impl Responder, actix_web::Error> {
    let hashed_password = &Sha256::digest(format!("{}:{}", credentials.password, credentials.username))[..];

    let Some(employee) = Employee::find()
        .filter(employee::Column::Username.eq(&credentials.username))
        .filter(employee::Column::Password.eq(hashed_password))
        .filter(employee::Column::Active.eq(true))
        .one(db.get_ref()).await.map_err(ApiError::from)?
    else {
        return Err(actix_web::error::ErrorForbidden("invalid credentials"));
    };

    info!(employee_id = %employee.id, "Employee logged in");

    Ok(authority.issue_for(&employee)?)
}

#[get("")]
async fn whoami(session: Session) -> impl Responder {
    web::Json(session)
}

#[cfg(test)]
mod tests {
    use actix_web::{body::MessageBody, http::{Method, StatusCode}, test, App};
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::{auth::tests::employee_with_role, entity::sea_orm_active_enums::RoleType};

    use super::*;

    #[actix_web::test]
    async fn test_login() {
        let secret = b"secret";

        let employee_password = "secret";
        let employee = employee::Model {
            password: Sha256::digest(format!("{}:{}", employee_password, "Bob")).to_vec(),
            ..employee_with_role(RoleType::Hr)
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ ],
                vec![ employee.clone() ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .app_data(web::Data::new(db.into_connection()))
                .service(login)
        ).await;

        {
            let forbidden_req = test::TestRequest::default()
                .uri("/login")
                .method(Method::POST)
                .set_json(Login {
                    username: "username".to_owned(),
                    password: "password".to_owned(),
                })
                .to_request();

            let response = test::call_service(&app, forbidden_req).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }

        {
            let success_req = test::TestRequest::default()
                .uri("/login")
                .method(Method::POST)
                .set_json(Login {
                    username: employee.username.clone(),
                    password: employee_password.to_owned(),
                })
                .to_request();

            let response = test::call_service(&app, success_req).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = response.into_body().try_into_bytes().unwrap();
            let session = Authority::new(secret).authorize(String::from_utf8_lossy(&body)).unwrap();
            assert_eq!(session, Session::from(&employee));
        }
    }

    #[actix_web::test]
    async fn test_whoami() {
        let secret = b"secret";
        let employee = employee_with_role(RoleType::Employee);
        let token = Authority::new(secret).issue_for(&employee).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(secret)))
                .service(web::scope("/auth").service(whoami))
        ).await;

        let req = test::TestRequest::default()
            .uri("/auth")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let session: Session = test::call_and_read_body_json(&app, req).await;
        assert_eq!(session, Session::from(&employee));
    }
}
