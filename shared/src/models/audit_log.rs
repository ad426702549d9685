//! Audit Log Model
//!
//! Append-only trail of actor/action/entity/old/new. Entries are never
//! updated or deleted.

use serde::{Deserialize, Serialize};

/// Audited action (enum, not free text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    PunchRecorded,
    RequestCreated,
    RequestReviewed,
    RequestUpdated,
    RequestDeleted,
    UserCreated,
    UserStatusChanged,
    LocationCreated,
}

/// Audit log entry
///
/// `old_value`/`new_value` hold JSON snapshots serialized to TEXT.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AuditLog {
    pub id: i64,
    /// None for system-initiated actions
    pub actor_id: Option<i64>,
    pub action: AuditAction,
    pub entity_affected: String,
    pub entity_id: Option<i64>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub timestamp_utc: i64,
}
