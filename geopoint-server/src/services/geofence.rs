//! Geofence validation
//!
//! Resolves a coordinate pair against the zones visible to a user:
//! company-wide zones plus the user's own approved home-office zones.
//! A point on the exact radius boundary is inside.

use sqlx::SqliteExecutor;

use crate::db::repository::location;
use crate::services::geo::distance_meters;
use crate::utils::{AppError, AppResult};

/// Find the first zone containing the point, or reject.
///
/// Zero visible zones is a setup problem (400), a miss against
/// configured zones is a policy rejection (403).
pub async fn locate(
    executor: impl SqliteExecutor<'_>,
    user_id: i64,
    latitude: f64,
    longitude: f64,
) -> AppResult<String> {
    let zones = location::find_zones_for_user(executor, user_id).await?;

    if zones.is_empty() {
        return Err(AppError::NoZonesConfigured);
    }

    for zone in &zones {
        let distance = distance_meters(latitude, longitude, zone.latitude, zone.longitude);
        if distance <= zone.radius_meters as f64 {
            return Ok(zone.name.clone());
        }
    }

    Err(AppError::OutsideGeofence {
        latitude,
        longitude,
    })
}
