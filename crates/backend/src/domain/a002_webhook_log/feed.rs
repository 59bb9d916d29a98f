// Канал новых записей лога доставки
//
// Каждая вставленная запись публикуется всем подписчикам; подписка — это
// обычный broadcast::Receiver, drop которого освобождает канал.

use contracts::domain::a002_webhook_log::entry::WebhookLogEntry;
use once_cell::sync::Lazy;
use tokio::sync::broadcast;

static LOG_FEED: Lazy<LogFeed> = Lazy::new(|| LogFeed::new(256));

/// Процесс-глобальная лента лога
pub fn feed() -> &'static LogFeed {
    &LOG_FEED
}

pub struct LogFeed {
    sender: broadcast::Sender<WebhookLogEntry>,
}

impl LogFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Опубликовать запись всем подписчикам
    pub fn publish(&self, entry: WebhookLogEntry) {
        // Отсутствие подписчиков — не ошибка
        let _ = self.sender.send(entry);
    }

    /// Подписаться на новые записи
    pub fn subscribe(&self) -> broadcast::Receiver<WebhookLogEntry> {
        self.sender.subscribe()
    }

    /// Число активных подписчиков
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_webhook_log::entry::WebhookLogStatus;
    use uuid::Uuid;

    #[tokio::test]
    async fn subscriber_receives_published_entries() {
        let feed = LogFeed::new(8);
        let mut rx = feed.subscribe();

        let ok = WebhookLogEntry::success(Uuid::new_v4(), serde_json::json!({}), "ok".into());
        let err = WebhookLogEntry::failure(Uuid::new_v4(), serde_json::json!({}), "down".into());
        feed.publish(ok.clone());
        feed.publish(err.clone());

        let first = rx.recv().await.unwrap();
        assert_eq!(first.id, ok.id);
        assert_eq!(first.status, WebhookLogStatus::Success);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.id, err.id);
        assert_eq!(second.status, WebhookLogStatus::Error);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let feed = LogFeed::new(8);
        assert_eq!(feed.subscriber_count(), 0);
        feed.publish(WebhookLogEntry::success(
            Uuid::new_v4(),
            serde_json::json!({}),
            "ok".into(),
        ));
    }

    #[tokio::test]
    async fn dropped_subscriber_stops_counting() {
        let feed = LogFeed::new(8);
        let rx = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 1);
        drop(rx);
        feed.publish(WebhookLogEntry::success(
            Uuid::new_v4(),
            serde_json::json!({}),
            "ok".into(),
        ));
        assert_eq!(feed.subscriber_count(), 0);
    }
}
