//! Time Entry API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::models::{PunchRecorded, TimeEntry, TimeEntryCreate};

use crate::core::ServerState;
use crate::db::repository::{time_entry, user};
use crate::services::time_entry::record_punch;
use crate::utils::{AppError, AppResult};

const HISTORY_PAGE: i64 = 50;

pub async fn record(
    State(state): State<ServerState>,
    Json(payload): Json<TimeEntryCreate>,
) -> AppResult<(StatusCode, Json<PunchRecorded>)> {
    let recorded = record_punch(state.pool(), state.clock.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<TimeEntry>>> {
    if user::find_by_id(state.pool(), id).await?.is_none() {
        return Err(AppError::UserNotFound);
    }
    let entries = time_entry::list_recent(state.pool(), id, HISTORY_PAGE).await?;
    Ok(Json(entries))
}
