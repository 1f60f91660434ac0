use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
mod handlers;
pub mod import;
pub mod models;
mod routes;
pub mod telemetry;

use crate::config::jwt::JwtSettings;
use crate::error::ApiError;
use crate::routes::init_routes;

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool = web::Data::new(db_pool);
    let jwt_settings = web::Data::new(jwt_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            // Malformed input gets the same error body as every other client error
            .app_data(web::JsonConfig::default().error_handler(|err, _| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::FormConfig::default().error_handler(|err, _| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(db_pool.clone())
            .app_data(jwt_settings.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
