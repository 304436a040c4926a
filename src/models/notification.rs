use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub recipient_id: Uuid,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub recipient_id: Uuid,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
}

impl Notification {
    pub fn from_draft(draft: NotificationDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            message: draft.message,
            kind: draft.kind,
            recipient_id: draft.recipient_id,
            entity_type: draft.entity_type,
            entity_id: draft.entity_id,
            read_at: None,
            created_at: Utc::now(),
        }
    }
}
