use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::geo::haversine_km;
use crate::models::vendor::{GeoPoint, VendorStatus};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct RankedVendor {
    pub vendor_id: Uuid,
    pub vendor_name: String,
    pub distance: f64,
    pub phone: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("ranking backend unavailable: {0}")]
    Unavailable(String),
}

/// Source of ranked candidates for a dispatch attempt. The dispatcher treats
/// the returned order as authoritative and never re-sorts; tie policy belongs
/// to the implementation.
pub trait VendorRanker: Send + Sync {
    fn rank(
        &self,
        origin: &GeoPoint,
        service_type: &str,
    ) -> Result<Vec<RankedVendor>, RankingError>;
}

pub struct NearestVendorRanker {
    state: Arc<AppState>,
}

impl NearestVendorRanker {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl VendorRanker for NearestVendorRanker {
    fn rank(
        &self,
        origin: &GeoPoint,
        service_type: &str,
    ) -> Result<Vec<RankedVendor>, RankingError> {
        let mut candidates: Vec<RankedVendor> = self
            .state
            .vendors
            .iter()
            .filter_map(|entry| {
                let vendor = entry.value();
                let eligible = vendor.status == VendorStatus::Active
                    && vendor.specialization.iter().any(|s| s == service_type);

                if eligible {
                    Some(RankedVendor {
                        vendor_id: vendor.id,
                        vendor_name: vendor.name.clone(),
                        distance: haversine_km(&vendor.location, origin),
                        phone: vendor.phone.clone(),
                    })
                } else {
                    None
                }
            })
            .collect();

        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(candidates)
    }
}
