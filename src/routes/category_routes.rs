use actix_web::{web, HttpResponse};

use super::method_not_allowed;
use crate::categories::CategoryService;
use crate::error::AppError;
use crate::extract::AuthenticatedUser;
use crate::models::{CreateCategory, MessageResponse, UpdateCategory};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .service(
                web::resource("")
                    .route(web::get().to(list_categories))
                    .route(web::post().to(create_category))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/{name}")
                    .route(web::put().to(update_category))
                    .route(web::delete().to(delete_category))
                    .default_service(web::to(method_not_allowed)),
            ),
    );
}

async fn list_categories(
    caller: AuthenticatedUser,
    categories: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let list = categories.list(caller.id).await?;
    Ok(HttpResponse::Ok().json(list))
}

async fn create_category(
    caller: AuthenticatedUser,
    categories: web::Data<CategoryService>,
    body: web::Json<CreateCategory>,
) -> Result<HttpResponse, AppError> {
    let new_category = body.into_inner().validate()?;
    let created = categories.create(caller.id, new_category).await?;
    Ok(HttpResponse::Created().json(created))
}

async fn update_category(
    caller: AuthenticatedUser,
    categories: web::Data<CategoryService>,
    name: web::Path<String>,
    body: web::Json<UpdateCategory>,
) -> Result<HttpResponse, AppError> {
    let update = body.into_inner().validate()?;
    let updated = categories.update(caller.id, &name, update).await?;
    Ok(HttpResponse::Ok().json(updated))
}

async fn delete_category(
    caller: AuthenticatedUser,
    categories: web::Data<CategoryService>,
    name: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    categories.delete(caller.id, &name).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Categoria deletada com sucesso")))
}
