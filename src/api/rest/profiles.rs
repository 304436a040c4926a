use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::profile::Profile;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/profiles", post(create_profile).get(list_profiles))
}

#[derive(Deserialize)]
pub struct CreateProfileRequest {
    pub user_id: Uuid,
    pub vendor_id: Option<Uuid>,
}

async fn create_profile(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    let profile = Profile {
        id: Uuid::new_v4(),
        user_id: payload.user_id,
        vendor_id: payload.vendor_id,
        created_at: Utc::now(),
    };

    if let Some(vendor_id) = payload.vendor_id {
        match state.vendor_profiles.entry(vendor_id) {
            Entry::Occupied(_) => {
                return Err(AppError::Conflict(format!(
                    "vendor {vendor_id} is already linked to a profile"
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(profile.id);
            }
        }
    }

    state.profiles.insert(profile.id, profile.clone());
    Ok(Json(profile))
}

async fn list_profiles(State(state): State<Arc<AppState>>) -> Json<Vec<Profile>> {
    let profiles = state
        .profiles
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(profiles)
}
