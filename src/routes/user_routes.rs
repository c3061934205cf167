use actix_web::{web, HttpResponse};
use log::info;

use super::method_not_allowed;
use crate::auth::AuthService;
use crate::error::AppError;
use crate::extract::AuthenticatedUser;
use crate::models::MessageResponse;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users").service(
            web::resource("/me")
                .route(web::get().to(get_current_user))
                .route(web::delete().to(delete_current_user))
                .default_service(web::to(method_not_allowed)),
        ),
    );
}

async fn get_current_user(
    caller: AuthenticatedUser,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.find_user(caller.id).await?;
    Ok(HttpResponse::Ok().json(user))
}

async fn delete_current_user(
    caller: AuthenticatedUser,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    info!("Request to delete account received for: {}", caller.email);
    auth_service.delete_account(caller.id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Conta excluída com sucesso")))
}
