use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a001_webhook_config;
use crate::domain::a001_webhook_config::service::DispatchError;

/// GET /api/webhook_config
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a001_webhook_config::aggregate::WebhookConfig>>,
    axum::http::StatusCode,
> {
    match a001_webhook_config::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/webhook_config/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<
    Json<contracts::domain::a001_webhook_config::aggregate::WebhookConfig>,
    axum::http::StatusCode,
> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_webhook_config::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// DELETE /api/webhook_config/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };

    match a001_webhook_config::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/webhook_config
pub async fn upsert(
    Json(dto): Json<contracts::domain::a001_webhook_config::aggregate::WebhookConfigDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    // Определяем операцию: create или update
    let result = if dto.id.is_some() {
        a001_webhook_config::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a001_webhook_config::service::create(dto)
            .await
            .map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/webhook_config/:id/test
pub async fn test_webhook(
    Path(id): Path<String>,
) -> Result<
    Json<contracts::domain::a001_webhook_config::aggregate::WebhookDispatchResult>,
    axum::http::StatusCode,
> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };

    match a001_webhook_config::service::dispatch(uuid).await {
        Ok(result) => Ok(Json(result)),
        Err(DispatchError::NotFound) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(DispatchError::Store(_)) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
