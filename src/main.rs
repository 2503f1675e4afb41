use std::fs::OpenOptions;

use actix_web::{web, App, HttpServer};
use sea_orm::Database;
use tracing::{info, Level};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{filter, fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::auth::Authority;

mod config;
mod consts;
mod utils;

mod entity;
mod auth;
mod store;
mod payroll;
mod pages;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();

    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("trace.log")?;

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_line_number(true)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(log_file)
                .with_filter(filter::LevelFilter::from_level(Level::TRACE))
        );

    tracing::subscriber::set_global_default(subscriber)
        .expect("a global tracing subscriber is already installed");

    let config::Config {
        host_address,
        database_opt,
        jwt_key,
        working_days,
    } = config::load();

    let database = web::Data::new(Database::connect(database_opt).await.map_err(std::io::Error::other)?);
    let authority = web::Data::new(Authority::new(jwt_key.as_bytes()));
    let working_days = web::Data::new(working_days);

    info!(%host_address, ?working_days, "Starting payroll server");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(database.clone())
            .app_data(authority.clone())
            .app_data(working_days.clone())
            .wrap(TracingLogger::default())
            .configure(pages::config)
    });

    server
        .bind(host_address)?
        .run().await
}
