use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::vendor::{GeoPoint, Vendor, VendorStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vendors", post(create_vendor).get(list_vendors))
        .route("/vendors/:id/status", patch(update_vendor_status))
        .route("/vendors/:id/location", patch(update_vendor_location))
}

#[derive(Deserialize)]
pub struct CreateVendorRequest {
    pub name: String,
    pub specialization: Vec<String>,
    pub phone: String,
    pub location: GeoPoint,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: VendorStatus,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub location: GeoPoint,
}

async fn create_vendor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateVendorRequest>,
) -> Result<Json<Vendor>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if payload.specialization.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::BadRequest(
            "at least one specialization is required".to_string(),
        ));
    }

    let now = Utc::now();
    let vendor = Vendor {
        id: Uuid::new_v4(),
        name: payload.name,
        specialization: payload.specialization,
        phone: payload.phone,
        location: payload.location,
        status: VendorStatus::Active,
        created_at: now,
        updated_at: now,
    };

    state.vendors.insert(vendor.id, vendor.clone());
    Ok(Json(vendor))
}

async fn list_vendors(State(state): State<Arc<AppState>>) -> Json<Vec<Vendor>> {
    let vendors = state
        .vendors
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(vendors)
}

async fn update_vendor_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Vendor>, AppError> {
    let mut vendor = state
        .vendors
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("vendor {} not found", id)))?;

    vendor.status = payload.status;
    vendor.updated_at = Utc::now();

    Ok(Json(vendor.clone()))
}

async fn update_vendor_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<Vendor>, AppError> {
    let mut vendor = state
        .vendors
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("vendor {} not found", id)))?;

    vendor.location = payload.location;
    vendor.updated_at = Utc::now();

    Ok(Json(vendor.clone()))
}
