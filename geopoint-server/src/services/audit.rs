//! Audit trail
//!
//! Mutations record who did what with before/after snapshots. A failed
//! audit write is logged and swallowed: the business mutation already
//! committed and must not be rolled back by trail bookkeeping.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

use shared::models::AuditAction;

use crate::db::repository::audit_log::{self, NewAuditLog};

fn snapshot<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(error = %e, "Failed to serialize audit snapshot");
            None
        }
    }
}

/// Record an audit entry; never fails the caller.
pub async fn record<O: Serialize, N: Serialize>(
    pool: &SqlitePool,
    actor_id: Option<i64>,
    action: AuditAction,
    entity_affected: &str,
    entity_id: Option<i64>,
    old_value: Option<&O>,
    new_value: Option<&N>,
) {
    let entry = NewAuditLog {
        actor_id,
        action,
        entity_affected: entity_affected.to_string(),
        entity_id,
        old_value: old_value.and_then(snapshot),
        new_value: new_value.and_then(snapshot),
    };

    if let Err(e) = audit_log::insert(pool, entry).await {
        warn!(error = %e, ?action, "Audit write failed");
    }
}

/// Shorthand for creations, where only the new state exists.
pub async fn record_created<N: Serialize>(
    pool: &SqlitePool,
    actor_id: Option<i64>,
    action: AuditAction,
    entity_affected: &str,
    entity_id: i64,
    new_value: &N,
) {
    record::<(), N>(
        pool,
        actor_id,
        action,
        entity_affected,
        Some(entity_id),
        None,
        Some(new_value),
    )
    .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn created_entries_carry_only_new_state() {
        let db = DbService::in_memory().await.unwrap();

        record_created(
            &db.pool,
            Some(7),
            AuditAction::LocationCreated,
            "location",
            42,
            &serde_json::json!({ "name": "HQ" }),
        )
        .await;

        let logs = audit_log::list_recent(&db.pool, 10).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].actor_id, Some(7));
        assert_eq!(logs[0].entity_id, Some(42));
        assert!(logs[0].old_value.is_none());
        assert!(logs[0].new_value.as_deref().unwrap().contains("HQ"));
    }
}
