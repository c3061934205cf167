use actix_web::{web, HttpResponse};

use super::method_not_allowed;
use crate::error::AppError;
use crate::extract::AuthenticatedUser;
use crate::models::{MessageResponse, TransactionInput};
use crate::transactions::TransactionService;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .service(
                web::resource("")
                    .route(web::get().to(list_transactions))
                    .route(web::post().to(create_transaction))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_transaction))
                    .route(web::delete().to(delete_transaction))
                    .default_service(web::to(method_not_allowed)),
            ),
    );
}

async fn list_transactions(
    caller: AuthenticatedUser,
    transactions: web::Data<TransactionService>,
) -> Result<HttpResponse, AppError> {
    let list = transactions.list(caller.id).await?;
    Ok(HttpResponse::Ok().json(list))
}

async fn create_transaction(
    caller: AuthenticatedUser,
    transactions: web::Data<TransactionService>,
    body: web::Json<TransactionInput>,
) -> Result<HttpResponse, AppError> {
    let fields = body.into_inner().validate()?;
    let created = transactions.create(caller.id, fields).await?;
    Ok(HttpResponse::Created().json(created))
}

async fn update_transaction(
    caller: AuthenticatedUser,
    transactions: web::Data<TransactionService>,
    id: web::Path<String>,
    body: web::Json<TransactionInput>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;
    let fields = body.into_inner().validate()?;
    let updated = transactions.update(caller.id, id, fields).await?;
    Ok(HttpResponse::Ok().json(updated))
}

async fn delete_transaction(
    caller: AuthenticatedUser,
    transactions: web::Data<TransactionService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;
    transactions.delete(caller.id, id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Transação deletada com sucesso")))
}

/// An id that cannot exist is reported like one that does not.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::not_found("Transação não encontrada"))
}
