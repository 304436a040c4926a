use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::notification::{Notification, NotificationDraft};
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 100;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/notifications",
            post(create_notification).get(list_notifications),
        )
        .route("/notifications/:id/read", patch(mark_read))
        .route("/notifications/read-all", post(mark_all_read))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub recipient: Uuid,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct RecipientQuery {
    pub recipient: Uuid,
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Json<Vec<Notification>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let mut notifications: Vec<Notification> = state
        .notifications
        .iter()
        .filter(|entry| entry.value().recipient_id == params.recipient)
        .map(|entry| entry.value().clone())
        .collect();

    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    notifications.truncate(limit);

    Json(notifications)
}

async fn create_notification(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<NotificationDraft>,
) -> Result<Json<Notification>, AppError> {
    if draft.title.trim().is_empty() {
        return Err(AppError::BadRequest("title cannot be empty".to_string()));
    }

    if draft.message.trim().is_empty() {
        return Err(AppError::BadRequest("message cannot be empty".to_string()));
    }

    Ok(Json(state.insert_notification(draft)))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    let mut notification = state
        .notifications
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("notification {} not found", id)))?;

    if notification.read_at.is_none() {
        notification.read_at = Some(Utc::now());
    }

    Ok(Json(notification.clone()))
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecipientQuery>,
) -> Json<serde_json::Value> {
    let now = Utc::now();
    let mut marked = 0u64;

    for mut entry in state.notifications.iter_mut() {
        let notification = entry.value_mut();
        if notification.recipient_id == params.recipient && notification.read_at.is_none() {
            notification.read_at = Some(now);
            marked += 1;
        }
    }

    Json(json!({ "marked_read": marked }))
}
