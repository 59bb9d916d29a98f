use axum::{
    extract::Query,
    response::{
        sse::{Event, KeepAlive},
        Sse,
    },
    Json,
};
use serde::Deserialize;
use std::convert::Infallible;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

use crate::domain::a002_webhook_log;
use crate::domain::a002_webhook_log::feed::feed;

#[derive(Deserialize)]
pub struct WebhookLogListParams {
    pub limit: Option<u64>,
}

/// GET /api/webhook_log
pub async fn list_recent(
    Query(params): Query<WebhookLogListParams>,
) -> Result<Json<Vec<contracts::domain::a002_webhook_log::entry::WebhookLogEntry>>, axum::http::StatusCode>
{
    let limit = params.limit.unwrap_or(50).clamp(1, 500);
    match a002_webhook_log::service::list_recent(limit).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/webhook_log/stream
///
/// SSE-лента новых записей лога: по одному JSON-событию на вставку.
pub async fn stream() -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    tracing::info!("New log feed subscriber connected");

    let rx = feed().subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => match serde_json::to_string(&entry) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize log entry");
                None
            }
        },
        Err(e) => {
            // Отставший подписчик пропускает события, не ломая ленту
            tracing::warn!(error = %e, "Log feed receiver lagged");
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
