use actix_web::{error, web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod auth;
pub mod health;
pub mod pagination;
pub mod students;
pub mod teachers;

/// Register every route. Shared by `main.rs` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));

    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(
        web::scope("/api/v1")
            .service(web::scope("/auth").configure(auth::configure_routes))
            .service(web::scope("/teachers").configure(teachers::configure_routes))
            .service(web::scope("/students").configure(students::configure_routes)),
    );
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {err}")).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
}
