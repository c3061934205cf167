use actix_cors::Cors;
use actix_web::{http::header, web, HttpResponse};
use serde_json::json;

use crate::error::AppError;

pub mod auth_routes;
pub mod category_routes;
pub mod settings_routes;
pub mod transaction_routes;
pub mod user_routes;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .service(
                web::resource("/health")
                    .route(web::get().to(health_check))
                    .default_service(web::to(method_not_allowed)),
            )
            .configure(auth_routes::config)
            .configure(category_routes::config)
            .configure(transaction_routes::config)
            .configure(settings_routes::config)
            .configure(user_routes::config),
    );
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600)
}

/// Malformed bodies get the same `{ "error": ... }` shape as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::validation(format!("Requisição inválida: {}", err)).into())
}

pub(crate) async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Backend está funcionando!"
    }))
}
