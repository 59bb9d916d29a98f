use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор вебхука
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebhookConfigId(pub Uuid);

impl WebhookConfigId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for WebhookConfigId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(WebhookConfigId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// Именованный параметр вебхука (пара имя/значение)
///
/// Порядок пар значим: при сборке payload более поздний дубликат имени
/// перезаписывает более ранний.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WebhookParameter {
    pub name: String,
    pub value: String,
}

impl WebhookParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Собрать JSON-payload из списка параметров
///
/// Пары вставляются в порядке следования; пустой список даёт `{}`,
/// пустое имя сохраняется как ключ `""`.
pub fn build_payload(parameters: &[WebhookParameter]) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for p in parameters {
        map.insert(p.name.clone(), serde_json::Value::String(p.value.clone()));
    }
    serde_json::Value::Object(map)
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Конфигурация исходящего вебхука: endpoint плюс список параметров
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(flatten)]
    pub base: BaseAggregate<WebhookConfigId>,

    // Специфичные поля агрегата
    pub url: String,
    #[serde(default)]
    pub parameters: Vec<WebhookParameter>,

    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

impl WebhookConfig {
    /// Создать новый вебхук для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        url: String,
        comment: Option<String>,
        parameters: Vec<WebhookParameter>,
        is_active: bool,
    ) -> Self {
        let mut base = BaseAggregate::new(WebhookConfigId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            url,
            parameters,
            is_active,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &WebhookConfigDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.url = dto.url.clone();
        self.parameters = dto.parameters.clone();
        self.is_active = dto.is_active;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if self.url.trim().is_empty() {
            return Err("URL не может быть пустым".into());
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err("URL должен начинаться с http:// или https://".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        Ok(())
    }

    /// Собрать payload из текущего списка параметров
    pub fn request_payload(&self) -> serde_json::Value {
        build_payload(&self.parameters)
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for WebhookConfig {
    type Id = WebhookConfigId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "webhook_config"
    }

    fn element_name() -> &'static str {
        "Вебхук"
    }

    fn list_name() -> &'static str {
        "Вебхуки"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления вебхука
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebhookConfigDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub url: String,
    pub comment: Option<String>,

    #[serde(default)]
    pub parameters: Vec<WebhookParameter>,

    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

/// Результат тестовой отправки вебхука
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookDispatchResult {
    pub success: bool,
    pub message: String,
    /// Текст тела ответа (есть только при полученном HTTP-ответе)
    pub response: Option<String>,
    pub duration_ms: u64,
    pub dispatched_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_from_ordered_parameters() {
        let params = vec![
            WebhookParameter::new("a", "1"),
            WebhookParameter::new("b", "2"),
        ];
        let payload = build_payload(&params);
        assert_eq!(payload, serde_json::json!({"a": "1", "b": "2"}));
    }

    #[test]
    fn payload_duplicate_name_last_wins() {
        let params = vec![
            WebhookParameter::new("a", "1"),
            WebhookParameter::new("a", "2"),
        ];
        assert_eq!(build_payload(&params), serde_json::json!({"a": "2"}));
    }

    #[test]
    fn payload_empty_list_is_empty_object() {
        assert_eq!(build_payload(&[]), serde_json::json!({}));
    }

    #[test]
    fn payload_keeps_empty_name() {
        let params = vec![WebhookParameter::new("", "x")];
        assert_eq!(build_payload(&params), serde_json::json!({"": "x"}));
    }

    #[test]
    fn validate_rejects_bad_url() {
        let mut wh = WebhookConfig::new_for_insert(
            "WH-1".into(),
            "Test".into(),
            "ftp://example.com".into(),
            None,
            vec![],
            true,
        );
        assert!(wh.validate().is_err());

        wh.url = "https://example.com/hook".into();
        assert!(wh.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_description() {
        let wh = WebhookConfig::new_for_insert(
            "WH-1".into(),
            "  ".into(),
            "https://example.com".into(),
            None,
            vec![],
            false,
        );
        assert!(wh.validate().is_err());
    }
}
