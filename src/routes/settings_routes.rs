use actix_web::{web, HttpResponse};

use super::method_not_allowed;
use crate::error::AppError;
use crate::extract::AuthenticatedUser;
use crate::models::{MonthlyLimit, MonthlyLimitInput};
use crate::settings::SettingsService;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .service(
                web::resource("")
                    .route(web::get().to(get_settings))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/monthly-limit")
                    .route(web::put().to(set_monthly_limit))
                    .default_service(web::to(method_not_allowed)),
            ),
    );
}

async fn get_settings(
    caller: AuthenticatedUser,
    settings: web::Data<SettingsService>,
) -> Result<HttpResponse, AppError> {
    let monthly_limit = settings.monthly_limit(caller.id).await?;
    Ok(HttpResponse::Ok().json(MonthlyLimit { monthly_limit }))
}

async fn set_monthly_limit(
    caller: AuthenticatedUser,
    settings: web::Data<SettingsService>,
    body: web::Json<MonthlyLimitInput>,
) -> Result<HttpResponse, AppError> {
    let limit = body.into_inner().validate()?;
    let monthly_limit = settings.set_monthly_limit(caller.id, limit).await?;
    Ok(HttpResponse::Ok().json(MonthlyLimit { monthly_limit }))
}
