use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::engine::dispatch::{DispatchCommand, DispatchError, Dispatcher};
use crate::engine::ranking::NearestVendorRanker;
use crate::error::AppError;
use crate::models::notification::Notification;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dispatch", post(dispatch_vendor))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub maintenance_request_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub service_type: String,
    pub client_name: String,
    pub address: String,
}

#[derive(Serialize)]
pub struct DispatchedVendor {
    pub id: Uuid,
    pub name: String,
    pub distance: f64,
    pub phone: String,
}

#[derive(Serialize)]
pub struct DispatchResponse {
    pub success: bool,
    pub vendor: DispatchedVendor,
    pub notification: Notification,
}

async fn dispatch_vendor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DispatchRequest>,
) -> Result<Json<DispatchResponse>, AppError> {
    let start = Instant::now();
    let request_id = payload.maintenance_request_id;

    let ranker = Arc::new(NearestVendorRanker::new(state.clone()));
    let dispatcher = Dispatcher::new(ranker, state.clone());

    let command = DispatchCommand {
        request_id,
        latitude: payload.latitude,
        longitude: payload.longitude,
        service_type: payload.service_type,
        client_name: payload.client_name,
        address: payload.address,
    };

    let result = dispatcher.dispatch(command);

    let outcome_label = match &result {
        Ok(_) => "assigned",
        Err(DispatchError::NoVendorAvailable) => "no_vendor",
        Err(_) => "error",
    };
    let elapsed = start.elapsed().as_secs_f64();
    state
        .metrics
        .dispatch_latency_seconds
        .with_label_values(&[outcome_label])
        .observe(elapsed);
    state
        .metrics
        .dispatches_total
        .with_label_values(&[outcome_label])
        .inc();

    match &result {
        Err(DispatchError::NoVendorAvailable) => {
            info!(request_id = %request_id, "no vendor available for request");
        }
        Err(err) => {
            error!(request_id = %request_id, error = %err, "dispatch failed");
        }
        Ok(_) => {}
    }

    let outcome = result?;

    Ok(Json(DispatchResponse {
        success: true,
        vendor: DispatchedVendor {
            id: outcome.vendor.vendor_id,
            name: outcome.vendor.vendor_name,
            distance: outcome.vendor.distance,
            phone: outcome.vendor.phone,
        },
        notification: outcome.notification,
    }))
}
