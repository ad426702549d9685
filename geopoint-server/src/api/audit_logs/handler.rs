//! Audit Log API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::models::AuditLog;

use crate::core::ServerState;
use crate::db::repository::audit_log;
use crate::utils::AppResult;

const MAX_PAGE: i64 = 500;

#[derive(Deserialize)]
pub struct ListParams {
    limit: Option<i64>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<AuditLog>>> {
    let limit = params.limit.unwrap_or(100).clamp(1, MAX_PAGE);
    let logs = audit_log::list_recent(state.pool(), limit).await?;
    Ok(Json(logs))
}
