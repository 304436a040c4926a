use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vendor::GeoPoint;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Unassigned,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn can_transition_to(&self, next: &RequestStatus) -> bool {
        use RequestStatus::{Assigned, Cancelled, Completed, InProgress, Unassigned};

        matches!(
            (self, next),
            (Unassigned, Assigned)
                | (Assigned, InProgress)
                | (InProgress, Completed)
                | (Unassigned | Assigned | InProgress, Cancelled)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub client_name: String,
    pub address: String,
    pub service_type: String,
    pub location: Option<GeoPoint>,
    pub status: RequestStatus,
    pub assigned_vendor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
