use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

use super::method_not_allowed;
use crate::auth::AuthService;
use crate::error::AppError;
use crate::extract::AuthenticatedUser;
use crate::models::{LoginCredentials, RegisterCredentials};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/register")
                    .route(web::post().to(register))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/login")
                    .route(web::post().to(login))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/verify")
                    .route(web::get().to(verify))
                    .default_service(web::to(method_not_allowed)),
            ),
    );
}

async fn register(
    auth_service: web::Data<AuthService>,
    credentials: web::Json<RegisterCredentials>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for: {}", credentials.email);
    let response = auth_service.register(credentials.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

async fn login(
    auth_service: web::Data<AuthService>,
    credentials: web::Json<LoginCredentials>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for: {}", credentials.email);
    let response = auth_service.login(credentials.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn verify(
    auth_service: web::Data<AuthService>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.find_user(caller.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}
