//! Location Model (geofence zones)

use serde::{Deserialize, Serialize};

/// Zone kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Office,
    Home,
}

/// Geofence zone
///
/// `user_id = NULL` means company-wide; a non-null owner marks an
/// approved home-office zone for that employee. Coordinates use the
/// 8-decimal convention (~1 mm resolution). Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Location {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: i64,
    pub created_at: i64,
}

/// Create location payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCreate {
    pub user_id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius")]
    pub radius_meters: i64,
}

fn default_radius() -> i64 {
    100
}
