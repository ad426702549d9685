//! Audit Log Repository

use sqlx::SqliteExecutor;

use shared::models::{AuditAction, AuditLog};
use shared::util::{now_millis, snowflake_id};

use super::RepoResult;

#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub actor_id: Option<i64>,
    pub action: AuditAction,
    pub entity_affected: String,
    pub entity_id: Option<i64>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

pub async fn insert(
    executor: impl SqliteExecutor<'_>,
    data: NewAuditLog,
) -> RepoResult<AuditLog> {
    let log = AuditLog {
        id: snowflake_id(),
        actor_id: data.actor_id,
        action: data.action,
        entity_affected: data.entity_affected,
        entity_id: data.entity_id,
        old_value: data.old_value,
        new_value: data.new_value,
        timestamp_utc: now_millis(),
    };

    sqlx::query(
        "INSERT INTO audit_log (id, actor_id, action, entity_affected, entity_id, old_value, new_value, timestamp_utc)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(log.id)
    .bind(log.actor_id)
    .bind(log.action)
    .bind(&log.entity_affected)
    .bind(log.entity_id)
    .bind(log.old_value.as_deref())
    .bind(log.new_value.as_deref())
    .bind(log.timestamp_utc)
    .execute(executor)
    .await?;

    Ok(log)
}

pub async fn list_recent(
    executor: impl SqliteExecutor<'_>,
    limit: i64,
) -> RepoResult<Vec<AuditLog>> {
    let logs = sqlx::query_as::<_, AuditLog>(
        "SELECT id, actor_id, action, entity_affected, entity_id, old_value, new_value, timestamp_utc
         FROM audit_log ORDER BY timestamp_utc DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(executor)
    .await?;
    Ok(logs)
}
