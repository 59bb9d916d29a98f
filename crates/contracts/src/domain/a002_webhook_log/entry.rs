use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Статус попытки доставки вебхука
///
/// Любой полученный HTTP-ответ считается успехом; `Error` означает
/// исключительно транспортный сбой (сеть, DNS, разрыв соединения).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookLogStatus {
    Success,
    Error,
}

impl WebhookLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookLogStatus::Success => "success",
            WebhookLogStatus::Error => "error",
        }
    }
}

/// Запись лога одной попытки доставки вебхука
///
/// Создаётся ровно один раз на попытку и далее неизменяема. Поля
/// `response_payload` и `error_message` взаимоисключающие, поэтому
/// снаружи записи собираются только через `success`/`failure`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookLogEntry {
    pub id: Uuid,
    /// Ссылка на вебхук, который тестировался (существование не проверяется)
    pub webhook_id: Uuid,
    pub status: WebhookLogStatus,
    pub request_payload: serde_json::Value,
    pub response_payload: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl WebhookLogEntry {
    /// Запись об успешной доставке (получен HTTP-ответ)
    pub fn success(
        webhook_id: Uuid,
        request_payload: serde_json::Value,
        response_body: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            webhook_id,
            status: WebhookLogStatus::Success,
            request_payload,
            response_payload: Some(serde_json::json!({ "response": response_body })),
            error_message: None,
            created_at: chrono::Utc::now(),
        }
    }

    /// Запись о транспортном сбое
    pub fn failure(
        webhook_id: Uuid,
        request_payload: serde_json::Value,
        error_message: String,
    ) -> Self {
        let message = if error_message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            error_message
        };
        Self {
            id: Uuid::new_v4(),
            webhook_id,
            status: WebhookLogStatus::Error,
            request_payload,
            response_payload: None,
            error_message: Some(message),
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_entry_has_response_and_no_error() {
        let entry = WebhookLogEntry::success(
            Uuid::new_v4(),
            serde_json::json!({"a": "1"}),
            "ok".to_string(),
        );
        assert_eq!(entry.status, WebhookLogStatus::Success);
        assert_eq!(
            entry.response_payload,
            Some(serde_json::json!({"response": "ok"}))
        );
        assert!(entry.error_message.is_none());
    }

    #[test]
    fn failure_entry_has_error_and_no_response() {
        let entry = WebhookLogEntry::failure(
            Uuid::new_v4(),
            serde_json::json!({}),
            "connection refused".to_string(),
        );
        assert_eq!(entry.status, WebhookLogStatus::Error);
        assert!(entry.response_payload.is_none());
        assert_eq!(entry.error_message.as_deref(), Some("connection refused"));
    }

    #[test]
    fn failure_with_empty_message_falls_back() {
        let entry = WebhookLogEntry::failure(Uuid::new_v4(), serde_json::json!({}), "".into());
        assert_eq!(entry.error_message.as_deref(), Some("Unknown error"));
    }

    #[test]
    fn status_serializes_lowercase() {
        let s = serde_json::to_string(&WebhookLogStatus::Success).unwrap();
        assert_eq!(s, "\"success\"");
        let e = serde_json::to_string(&WebhookLogStatus::Error).unwrap();
        assert_eq!(e, "\"error\"");
    }
}
