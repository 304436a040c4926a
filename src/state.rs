use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::engine::dispatch::{DispatchStore, StoreError};
use crate::models::notification::{Notification, NotificationDraft};
use crate::models::profile::Profile;
use crate::models::request::{MaintenanceRequest, RequestStatus};
use crate::models::vendor::Vendor;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub vendors: DashMap<Uuid, Vendor>,
    pub profiles: DashMap<Uuid, Profile>,
    pub vendor_profiles: DashMap<Uuid, Uuid>,
    pub requests: DashMap<Uuid, MaintenanceRequest>,
    pub notifications: DashMap<Uuid, Notification>,
    pub notification_events_tx: broadcast::Sender<Notification>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize) -> Self {
        let (notification_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            vendors: DashMap::new(),
            profiles: DashMap::new(),
            vendor_profiles: DashMap::new(),
            requests: DashMap::new(),
            notifications: DashMap::new(),
            notification_events_tx,
            metrics: Metrics::new(),
        }
    }

    pub fn insert_notification(&self, draft: NotificationDraft) -> Notification {
        let notification = Notification::from_draft(draft);
        self.notifications
            .insert(notification.id, notification.clone());
        self.metrics.notifications_created_total.inc();
        let _ = self.notification_events_tx.send(notification.clone());
        notification
    }
}

impl DispatchStore for AppState {
    fn profile_for_vendor(&self, vendor_id: Uuid) -> Result<Option<Profile>, StoreError> {
        let profile_id = match self.vendor_profiles.get(&vendor_id) {
            Some(link) => *link.value(),
            None => return Ok(None),
        };

        Ok(self
            .profiles
            .get(&profile_id)
            .map(|entry| entry.value().clone()))
    }

    fn create_notification(&self, draft: NotificationDraft) -> Result<Notification, StoreError> {
        Ok(self.insert_notification(draft))
    }

    fn assign_vendor(&self, request_id: Uuid, vendor_id: Uuid) -> Result<(), StoreError> {
        let mut request = self.requests.get_mut(&request_id).ok_or_else(|| {
            StoreError::NotFound(format!("maintenance request {request_id}"))
        })?;

        if request.status == RequestStatus::Unassigned {
            self.metrics.requests_unassigned.dec();
        }

        request.assigned_vendor_id = Some(vendor_id);
        request.status = RequestStatus::Assigned;
        request.updated_at = Utc::now();

        Ok(())
    }
}
