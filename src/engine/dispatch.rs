use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::ranking::{RankedVendor, RankingError, VendorRanker};
use crate::models::notification::{Notification, NotificationDraft, NotificationKind};
use crate::models::profile::Profile;
use crate::models::vendor::GeoPoint;

pub const NOTIFICATION_TITLE: &str = "New maintenance request";
pub const ENTITY_MAINTENANCE_REQUEST: &str = "maintenance_request";

#[derive(Debug, Clone)]
pub struct DispatchCommand {
    pub request_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub service_type: String,
    pub client_name: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub vendor: RankedVendor,
    pub notification: Notification,
    pub assignment_recorded: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Mutation surface the dispatcher needs from the backing stores. Implemented
/// by the shared state in production and by scripted doubles in tests.
pub trait DispatchStore: Send + Sync {
    fn profile_for_vendor(&self, vendor_id: Uuid) -> Result<Option<Profile>, StoreError>;
    fn create_notification(&self, draft: NotificationDraft) -> Result<Notification, StoreError>;
    fn assign_vendor(&self, request_id: Uuid, vendor_id: Uuid) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no vendor available")]
    NoVendorAvailable,

    #[error("vendor ranking failed: {0}")]
    Ranking(#[from] RankingError),

    #[error("vendor profile not found for vendor {0}")]
    ProfileMissing(Uuid),

    #[error("vendor profile lookup failed: {0}")]
    ProfileLookup(StoreError),

    #[error("notification insert failed: {0}")]
    Notification(StoreError),
}

pub struct Dispatcher<R, S> {
    ranker: Arc<R>,
    store: Arc<S>,
}

impl<R, S> Dispatcher<R, S>
where
    R: VendorRanker,
    S: DispatchStore,
{
    pub fn new(ranker: Arc<R>, store: Arc<S>) -> Self {
        Self { ranker, store }
    }

    pub fn dispatch(&self, cmd: DispatchCommand) -> Result<DispatchOutcome, DispatchError> {
        let origin = GeoPoint {
            lat: cmd.latitude,
            lng: cmd.longitude,
        };

        let ranked = self.ranker.rank(&origin, &cmd.service_type)?;

        let Some(winner) = ranked.into_iter().next() else {
            return Err(DispatchError::NoVendorAvailable);
        };

        let profile = self
            .store
            .profile_for_vendor(winner.vendor_id)
            .map_err(DispatchError::ProfileLookup)?
            .ok_or(DispatchError::ProfileMissing(winner.vendor_id))?;

        let draft = NotificationDraft {
            title: NOTIFICATION_TITLE.to_string(),
            message: format!(
                "New maintenance request from {} at {}. Service type: {}. Distance: {:.2} km",
                cmd.client_name, cmd.address, cmd.service_type, winner.distance
            ),
            kind: NotificationKind::Info,
            recipient_id: profile.user_id,
            entity_type: Some(ENTITY_MAINTENANCE_REQUEST.to_string()),
            entity_id: Some(cmd.request_id),
        };

        let notification = self
            .store
            .create_notification(draft)
            .map_err(DispatchError::Notification)?;

        let assignment_recorded = match self.store.assign_vendor(cmd.request_id, winner.vendor_id) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    request_id = %cmd.request_id,
                    vendor_id = %winner.vendor_id,
                    error = %err,
                    "vendor notified but request assignment failed"
                );
                false
            }
        };

        info!(
            request_id = %cmd.request_id,
            vendor_id = %winner.vendor_id,
            vendor_name = %winner.vendor_name,
            distance_km = winner.distance,
            "vendor dispatched"
        );

        Ok(DispatchOutcome {
            vendor: winner,
            notification,
            assignment_recorded,
        })
    }
}
