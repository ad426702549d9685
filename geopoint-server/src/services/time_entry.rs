//! Punch recording
//!
//! Validation order is fixed: user, cooldown, geofence, shift cap.
//! The first rule that fails names the rejection; later rules are not
//! evaluated.

use sqlx::SqlitePool;
use tracing::info;

use shared::models::{AuditAction, PunchRecorded, TimeEntryCreate};

use crate::db::repository::{time_entry, user};
use crate::db::repository::time_entry::NewTimeEntry;
use crate::services::{audit, clock::Clock, geofence};
use crate::utils::time::utc_day_start_millis;
use crate::utils::{AppError, AppResult};

/// Minimum gap between two punches of the same user. A gap of exactly
/// the cooldown is accepted.
pub const PUNCH_COOLDOWN_MS: i64 = 60_000;

/// Longest span the first punch of a UTC day may be open before further
/// punches require a manual adjustment.
pub const MAX_OPEN_SHIFT_MS: i64 = 12 * 60 * 60 * 1000;

pub async fn record_punch(
    pool: &SqlitePool,
    clock: &dyn Clock,
    data: TimeEntryCreate,
) -> AppResult<PunchRecorded> {
    if user::find_by_id(pool, data.user_id).await?.is_none() {
        return Err(AppError::UserNotFound);
    }

    let now = clock.now_millis();

    if let Some(last) = time_entry::find_last_for_user(pool, data.user_id).await? {
        if now - last.timestamp_utc < PUNCH_COOLDOWN_MS {
            return Err(AppError::TooSoon);
        }
    }

    let zone = geofence::locate(pool, data.user_id, data.latitude, data.longitude).await?;

    let day_start = utc_day_start_millis(now);
    if let Some(first) = time_entry::find_first_since(pool, data.user_id, day_start).await? {
        if now - first.timestamp_utc > MAX_OPEN_SHIFT_MS {
            return Err(AppError::ShiftTooLong);
        }
    }

    let entry = time_entry::insert(
        pool,
        NewTimeEntry {
            user_id: data.user_id,
            timestamp_utc: now,
            entry_type: data.entry_type,
            origin: data.origin,
            latitude_recorded: data.latitude,
            longitude_recorded: data.longitude,
        },
    )
    .await?;

    info!(
        user_id = entry.user_id,
        entry_id = entry.id,
        zone = %zone,
        "Punch recorded"
    );

    audit::record_created(
        pool,
        Some(entry.user_id),
        AuditAction::PunchRecorded,
        "time_entry",
        entry.id,
        &entry,
    )
    .await;

    Ok(PunchRecorded { zone, entry })
}
