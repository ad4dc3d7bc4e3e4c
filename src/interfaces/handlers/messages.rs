use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::message::{MessageQuery, UpdateReadRequest, UpdateReadResponse},
    errors::AppError,
    use_cases::extractors::AdminAccess,
    AppState,
};

#[instrument(skip(_admin, state))]
pub async fn list_messages(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    query: web::Query<MessageQuery>,
) -> Result<impl Responder, AppError> {
    let messages = state.messages_handler.list_messages(&query).await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(_admin, state))]
pub async fn message_stats(
    _admin: AdminAccess,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let stats = state.messages_handler.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[instrument(skip(_admin, state, data))]
pub async fn update_message_read(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    data: web::Json<UpdateReadRequest>,
) -> Result<impl Responder, AppError> {
    let UpdateReadRequest { id, read } = data.into_inner();
    let message = state.messages_handler.set_read(id, read).await?;

    Ok(HttpResponse::Ok().json(UpdateReadResponse {
        success: true,
        message,
    }))
}

#[instrument(skip(_admin, state, query))]
pub async fn delete_message(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let id = query
        .get("id")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("Message ID is required".into()))?
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("Invalid message ID".into()))?;

    state.messages_handler.delete_message(id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Message deleted"
    })))
}
