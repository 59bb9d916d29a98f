use super::{feed, repository};
use contracts::domain::a002_webhook_log::entry::WebhookLogEntry;
use uuid::Uuid;

/// Сохранить запись лога и опубликовать её в ленту
///
/// Ровно одна запись на попытку доставки; публикация происходит только
/// после успешной вставки.
pub async fn record(entry: WebhookLogEntry) -> anyhow::Result<WebhookLogEntry> {
    repository::insert(&entry).await?;
    feed::feed().publish(entry.clone());
    Ok(entry)
}

/// Последние записи лога, новые сверху
pub async fn list_recent(limit: u64) -> anyhow::Result<Vec<WebhookLogEntry>> {
    repository::list_recent(limit).await
}

/// Записи по конкретному вебхуку
pub async fn list_for_webhook(webhook_id: Uuid) -> anyhow::Result<Vec<WebhookLogEntry>> {
    repository::list_for_webhook(webhook_id).await
}
