//! Time Entry Model (punches)

use serde::{Deserialize, Serialize};

/// Punch type
///
/// Deliberately binary: break start/end is inferred from punch order by
/// the consumer UI, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeEntryType {
    Entry,
    Exit,
}

/// Punch origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeEntryOrigin {
    Web,
    Mobile,
}

/// Time entry (immutable once recorded)
///
/// `timestamp_utc` is server-assigned at creation, never client-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: i64,
    /// Unix millis, UTC
    pub timestamp_utc: i64,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub entry_type: TimeEntryType,
    pub origin: TimeEntryOrigin,
    pub latitude_recorded: f64,
    pub longitude_recorded: f64,
    pub is_manual_adjustment: bool,
}

/// Punch request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntryCreate {
    pub user_id: i64,
    #[serde(rename = "type")]
    pub entry_type: TimeEntryType,
    pub origin: TimeEntryOrigin,
    pub latitude: f64,
    pub longitude: f64,
}

/// Punch result - the recorded entry plus the zone that validated it
/// (surfaced for UI feedback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRecorded {
    pub zone: String,
    pub entry: TimeEntry,
}
