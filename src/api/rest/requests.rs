use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::request::{MaintenanceRequest, RequestStatus};
use crate::models::vendor::GeoPoint;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/requests", post(create_request).get(list_requests))
        .route("/requests/:id", get(get_request))
        .route("/requests/:id/status", patch(update_request_status))
}

#[derive(Deserialize)]
pub struct CreateRequestRequest {
    pub client_name: String,
    pub address: String,
    pub service_type: String,
    pub location: Option<GeoPoint>,
}

#[derive(Deserialize)]
pub struct UpdateRequestStatusRequest {
    pub status: RequestStatus,
    pub assigned_vendor_id: Option<Uuid>,
}

async fn create_request(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRequestRequest>,
) -> Result<Json<MaintenanceRequest>, AppError> {
    if payload.client_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "client_name cannot be empty".to_string(),
        ));
    }

    if payload.service_type.trim().is_empty() {
        return Err(AppError::BadRequest(
            "service_type cannot be empty".to_string(),
        ));
    }

    let now = Utc::now();
    let request = MaintenanceRequest {
        id: Uuid::new_v4(),
        client_name: payload.client_name,
        address: payload.address,
        service_type: payload.service_type,
        location: payload.location,
        status: RequestStatus::Unassigned,
        assigned_vendor_id: None,
        created_at: now,
        updated_at: now,
    };

    state.requests.insert(request.id, request.clone());
    state.metrics.requests_unassigned.inc();

    Ok(Json(request))
}

async fn list_requests(State(state): State<Arc<AppState>>) -> Json<Vec<MaintenanceRequest>> {
    let mut requests: Vec<MaintenanceRequest> = state
        .requests
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Json(requests)
}

async fn get_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceRequest>, AppError> {
    let request = state
        .requests
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("maintenance request {} not found", id)))?;

    Ok(Json(request.value().clone()))
}

async fn update_request_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequestStatusRequest>,
) -> Result<Json<MaintenanceRequest>, AppError> {
    let mut request = state
        .requests
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("maintenance request {} not found", id)))?;

    if !request.status.can_transition_to(&payload.status) {
        return Err(AppError::Conflict(format!(
            "cannot transition request from {:?} to {:?}",
            request.status, payload.status
        )));
    }

    if payload.status == RequestStatus::Assigned {
        let vendor_id = payload.assigned_vendor_id.ok_or_else(|| {
            AppError::BadRequest("assigned_vendor_id is required to assign".to_string())
        })?;
        request.assigned_vendor_id = Some(vendor_id);
    }

    if request.status == RequestStatus::Unassigned {
        state.metrics.requests_unassigned.dec();
    }

    request.status = payload.status;
    request.updated_at = Utc::now();

    Ok(Json(request.clone()))
}
