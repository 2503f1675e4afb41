use actix_web::web;

mod auth;
mod error;
mod payroll;

pub(crate) use error::ApiError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::scope("/auth")
            .configure(auth::config))
        .service(web::scope("/payroll")
            .configure(payroll::config));
}
