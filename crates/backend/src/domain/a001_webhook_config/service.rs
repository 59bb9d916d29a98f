use super::repository;
use crate::domain::a002_webhook_log;
use chrono::Utc;
use contracts::domain::a001_webhook_config::aggregate::{
    build_payload, WebhookConfig, WebhookConfigDto, WebhookDispatchResult,
};
use contracts::domain::a002_webhook_log::entry::WebhookLogEntry;
use thiserror::Error;
use uuid::Uuid;

/// Ошибки тестовой отправки, не являющиеся исходом доставки
///
/// Транспортный сбой — это не ошибка сервиса, а записанный в лог результат;
/// здесь только то, из-за чего попытка не состоялась или не была записана.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Вебхук не найден")]
    NotFound,
    #[error("Ошибка хранилища: {0}")]
    Store(#[from] anyhow::Error),
}

/// Создание нового вебхука
pub async fn create(dto: WebhookConfigDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("WH-{}", Uuid::new_v4()));
    let mut aggregate = WebhookConfig::new_for_insert(
        code,
        dto.description,
        dto.url,
        dto.comment,
        dto.parameters,
        dto.is_active,
    );

    // Валидация
    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    // Before write
    aggregate.before_write();

    // Сохранение через repository
    repository::insert(&aggregate).await
}

/// Обновление существующего вебхука
pub async fn update(dto: WebhookConfigDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление вебхука
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение вебхука по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<WebhookConfig>> {
    repository::get_by_id(id).await
}

/// Получение списка всех вебхуков
pub async fn list_all() -> anyhow::Result<Vec<WebhookConfig>> {
    repository::list_all().await
}

/// Тестовая отправка вебхука
///
/// Ровно одна запись лога на вызов. Любой полученный HTTP-ответ (включая
/// 4xx/5xx) фиксируется как успех: различаются только транспортные сбои.
/// `webhook_id` в записи — это id вебхука, который реально тестировался.
pub async fn dispatch(id: Uuid) -> Result<WebhookDispatchResult, DispatchError> {
    let config = repository::get_by_id(id)
        .await?
        .ok_or(DispatchError::NotFound)?;

    let start = std::time::Instant::now();
    let payload = build_payload(&config.parameters);

    // Таймаут не задаётся: вызов ждёт ответа или транспортного сбоя
    let client = reqwest::Client::new();
    let response = client.post(&config.url).json(&payload).send().await;

    let outcome: Result<String, String> = match response {
        Ok(resp) => match resp.text().await {
            Ok(body) => Ok(body),
            Err(e) => Err(transport_error_message(&e)),
        },
        Err(e) => Err(transport_error_message(&e)),
    };
    let duration = start.elapsed();

    match outcome {
        Ok(body) => {
            let entry = WebhookLogEntry::success(id, payload, body.clone());
            a002_webhook_log::service::record(entry).await?;

            Ok(WebhookDispatchResult {
                success: true,
                message: "Ответ получен".into(),
                response: Some(body),
                duration_ms: duration.as_millis() as u64,
                dispatched_at: Utc::now(),
            })
        }
        Err(message) => {
            let entry = WebhookLogEntry::failure(id, payload, message.clone());
            a002_webhook_log::service::record(entry).await?;

            Ok(WebhookDispatchResult {
                success: false,
                message,
                response: None,
                duration_ms: duration.as_millis() as u64,
                dispatched_at: Utc::now(),
            })
        }
    }
}

/// Сообщение транспортной ошибки вместе с цепочкой причин
fn transport_error_message(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_webhook_config::aggregate::WebhookParameter;
    use contracts::domain::a002_webhook_log::entry::WebhookLogStatus;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn init_test_db() {
        crate::shared::data::db::initialize_database(Some("target/test/webhook_console_test.db"))
            .await
            .expect("test db init");
    }

    async fn create_webhook(url: &str, parameters: Vec<WebhookParameter>) -> Uuid {
        create(WebhookConfigDto {
            id: None,
            code: None,
            description: "Test webhook".into(),
            url: url.into(),
            comment: None,
            parameters,
            is_active: true,
        })
        .await
        .expect("create webhook")
    }

    fn header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    fn content_length(headers: &str) -> usize {
        headers
            .lines()
            .find_map(|line| {
                let lower = line.to_ascii_lowercase();
                lower
                    .strip_prefix("content-length:")
                    .and_then(|v| v.trim().parse().ok())
            })
            .unwrap_or(0)
    }

    /// Одноразовый HTTP-сервер на сокете: отдаёт заданный ответ и
    /// возвращает байты полученного запроса
    async fn spawn_stub_server(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<Vec<u8>>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = header_end(&request) {
                    let headers = String::from_utf8_lossy(&request[..pos]).to_string();
                    if request.len() >= pos + 4 + content_length(&headers) {
                        break;
                    }
                }
            }
            let response = format!(
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{addr}/hook"), handle)
    }

    #[tokio::test]
    async fn dispatch_success_records_single_entry() {
        init_test_db().await;
        let (url, server) = spawn_stub_server("HTTP/1.1 200 OK", "All good").await;

        let id = create_webhook(
            &url,
            vec![
                WebhookParameter::new("a", "1"),
                WebhookParameter::new("a", "2"),
                WebhookParameter::new("b", "3"),
            ],
        )
        .await;

        let result = dispatch(id).await.unwrap();
        assert!(result.success);
        assert_eq!(result.response.as_deref(), Some("All good"));

        // Отправленный запрос: JSON content-type, дубликат имени схлопнут
        let request = server.await.unwrap();
        let pos = header_end(&request).expect("full request captured");
        let headers = String::from_utf8_lossy(&request[..pos]).to_ascii_lowercase();
        assert!(headers.contains("content-type: application/json"));
        let sent: serde_json::Value = serde_json::from_slice(&request[pos + 4..]).unwrap();
        assert_eq!(sent, serde_json::json!({"a": "2", "b": "3"}));

        let entries = a002_webhook_log::service::list_for_webhook(id).await.unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.status, WebhookLogStatus::Success);
        assert_eq!(entry.request_payload, serde_json::json!({"a": "2", "b": "3"}));
        assert_eq!(
            entry.response_payload,
            Some(serde_json::json!({"response": "All good"}))
        );
        assert!(entry.error_message.is_none());
    }

    #[tokio::test]
    async fn dispatch_treats_http_error_status_as_success() {
        init_test_db().await;
        let (url, server) = spawn_stub_server("HTTP/1.1 500 Internal Server Error", "boom").await;

        let id = create_webhook(&url, vec![]).await;

        let result = dispatch(id).await.unwrap();
        assert!(result.success);
        assert_eq!(result.response.as_deref(), Some("boom"));
        server.await.unwrap();

        let entries = a002_webhook_log::service::list_for_webhook(id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, WebhookLogStatus::Success);
        assert_eq!(entries[0].request_payload, serde_json::json!({}));
        assert_eq!(
            entries[0].response_payload,
            Some(serde_json::json!({"response": "boom"}))
        );
    }

    #[tokio::test]
    async fn dispatch_transport_failure_records_error() {
        init_test_db().await;

        // Занимаем порт и сразу освобождаем: соединение будет отклонено
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let id = create_webhook(&format!("http://{addr}/hook"), vec![]).await;

        let result = dispatch(id).await.unwrap();
        assert!(!result.success);
        assert!(result.response.is_none());
        assert!(!result.message.trim().is_empty());

        let entries = a002_webhook_log::service::list_for_webhook(id).await.unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.status, WebhookLogStatus::Error);
        assert!(entry.response_payload.is_none());
        assert!(!entry.error_message.as_deref().unwrap_or("").is_empty());
    }

    #[tokio::test]
    async fn dispatch_unknown_webhook_is_not_found() {
        init_test_db().await;
        let result = dispatch(Uuid::new_v4()).await;
        assert!(matches!(result, Err(DispatchError::NotFound)));
    }
}
