use contracts::domain::a002_webhook_log::entry::{WebhookLogEntry, WebhookLogStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_webhook_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub webhook_id: String,
    pub status: String,
    pub request_payload: Json,
    pub response_payload: Option<Json>,
    pub error_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WebhookLogEntry {
    fn from(m: Model) -> Self {
        let status = match m.status.as_str() {
            "success" => WebhookLogStatus::Success,
            _ => WebhookLogStatus::Error,
        };
        WebhookLogEntry {
            id: Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4()),
            webhook_id: Uuid::parse_str(&m.webhook_id).unwrap_or_else(|_| Uuid::nil()),
            status,
            request_payload: m.request_payload,
            response_payload: m.response_payload,
            error_message: m.error_message,
            created_at: m.created_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Вставить запись лога (записи неизменяемы, только insert)
pub async fn insert(entry: &WebhookLogEntry) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(entry.id.to_string()),
        webhook_id: Set(entry.webhook_id.to_string()),
        status: Set(entry.status.as_str().to_string()),
        request_payload: Set(entry.request_payload.clone()),
        response_payload: Set(entry.response_payload.clone()),
        error_message: Set(entry.error_message.clone()),
        created_at: Set(entry.created_at),
    };
    active.insert(conn()).await?;
    Ok(())
}

/// Последние N записей, новые сверху
pub async fn list_recent(limit: u64) -> anyhow::Result<Vec<WebhookLogEntry>> {
    let items: Vec<WebhookLogEntry> = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Записи по конкретному вебхуку, новые сверху
pub async fn list_for_webhook(webhook_id: Uuid) -> anyhow::Result<Vec<WebhookLogEntry>> {
    let items: Vec<WebhookLogEntry> = Entity::find()
        .filter(Column::WebhookId.eq(webhook_id.to_string()))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}
