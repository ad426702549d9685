//! Time Entry Repository
//!
//! Rows are append-only: insert and read, no update or delete.

use sqlx::SqliteExecutor;

use shared::models::{TimeEntry, TimeEntryOrigin, TimeEntryType};
use shared::util::snowflake_id;

use super::RepoResult;

const COLUMNS: &str = "id, user_id, timestamp_utc, type, origin, latitude_recorded, \
                       longitude_recorded, is_manual_adjustment";

/// Insert payload - the timestamp is assigned by the caller's clock,
/// never taken from the client.
#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    pub user_id: i64,
    pub timestamp_utc: i64,
    pub entry_type: TimeEntryType,
    pub origin: TimeEntryOrigin,
    pub latitude_recorded: f64,
    pub longitude_recorded: f64,
}

pub async fn insert(
    executor: impl SqliteExecutor<'_>,
    data: NewTimeEntry,
) -> RepoResult<TimeEntry> {
    let entry = TimeEntry {
        id: snowflake_id(),
        user_id: data.user_id,
        timestamp_utc: data.timestamp_utc,
        entry_type: data.entry_type,
        origin: data.origin,
        latitude_recorded: data.latitude_recorded,
        longitude_recorded: data.longitude_recorded,
        is_manual_adjustment: false,
    };

    sqlx::query(
        "INSERT INTO time_entry (id, user_id, timestamp_utc, type, origin, latitude_recorded, longitude_recorded, is_manual_adjustment)
         VALUES (?, ?, ?, ?, ?, ?, ?, 0)",
    )
    .bind(entry.id)
    .bind(entry.user_id)
    .bind(entry.timestamp_utc)
    .bind(entry.entry_type)
    .bind(entry.origin)
    .bind(entry.latitude_recorded)
    .bind(entry.longitude_recorded)
    .execute(executor)
    .await?;

    Ok(entry)
}

/// Most recent punch for a user (cooldown check).
pub async fn find_last_for_user(
    executor: impl SqliteExecutor<'_>,
    user_id: i64,
) -> RepoResult<Option<TimeEntry>> {
    let entry = sqlx::query_as::<_, TimeEntry>(&format!(
        "SELECT {COLUMNS} FROM time_entry WHERE user_id = ? ORDER BY timestamp_utc DESC LIMIT 1"
    ))
    .bind(user_id)
    .fetch_optional(executor)
    .await?;
    Ok(entry)
}

/// First punch at or after `since_millis` (shift-duration cap).
pub async fn find_first_since(
    executor: impl SqliteExecutor<'_>,
    user_id: i64,
    since_millis: i64,
) -> RepoResult<Option<TimeEntry>> {
    let entry = sqlx::query_as::<_, TimeEntry>(&format!(
        "SELECT {COLUMNS} FROM time_entry WHERE user_id = ? AND timestamp_utc >= ? \
         ORDER BY timestamp_utc ASC LIMIT 1"
    ))
    .bind(user_id)
    .bind(since_millis)
    .fetch_optional(executor)
    .await?;
    Ok(entry)
}

/// Recent punches, newest first (simple pagination).
pub async fn list_recent(
    executor: impl SqliteExecutor<'_>,
    user_id: i64,
    limit: i64,
) -> RepoResult<Vec<TimeEntry>> {
    let entries = sqlx::query_as::<_, TimeEntry>(&format!(
        "SELECT {COLUMNS} FROM time_entry WHERE user_id = ? ORDER BY timestamp_utc DESC LIMIT ?"
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn seed_user(db: &DbService) {
        sqlx::query(
            "INSERT INTO user (id, full_name, email, role, department, job_title, status, work_schedule, created_at)
             VALUES (1, 'A', 'a@geo.com', 'EMPLOYEE', 'IT', 'DEVELOPER', 'ACTIVE', 'COMERCIAL', 0)",
        )
        .execute(&db.pool)
        .await
        .unwrap();
    }

    fn punch(ts: i64) -> NewTimeEntry {
        NewTimeEntry {
            user_id: 1,
            timestamp_utc: ts,
            entry_type: TimeEntryType::Entry,
            origin: TimeEntryOrigin::Web,
            latitude_recorded: -23.5,
            longitude_recorded: -46.6,
        }
    }

    #[tokio::test]
    async fn last_and_first_queries_respect_order() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db).await;

        for ts in [1_000, 5_000, 9_000] {
            insert(&db.pool, punch(ts)).await.unwrap();
        }

        let last = find_last_for_user(&db.pool, 1).await.unwrap().unwrap();
        assert_eq!(last.timestamp_utc, 9_000);

        let first = find_first_since(&db.pool, 1, 2_000).await.unwrap().unwrap();
        assert_eq!(first.timestamp_utc, 5_000);

        assert!(find_last_for_user(&db.pool, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_recent_is_newest_first_and_limited() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db).await;

        for ts in 0..60 {
            insert(&db.pool, punch(ts * 1_000)).await.unwrap();
        }

        let page = list_recent(&db.pool, 1, 50).await.unwrap();
        assert_eq!(page.len(), 50);
        assert_eq!(page[0].timestamp_utc, 59_000);
        assert!(page.windows(2).all(|w| w[0].timestamp_utc > w[1].timestamp_utc));
    }

    #[tokio::test]
    async fn recorder_inserts_are_never_manual_adjustments() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db).await;

        let entry = insert(&db.pool, punch(42)).await.unwrap();
        assert!(!entry.is_manual_adjustment);

        let fetched = find_last_for_user(&db.pool, 1).await.unwrap().unwrap();
        assert!(!fetched.is_manual_adjustment);
    }
}
