//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::models::{AuditAction, User, UserCreate, UserStatusUpdate};

use crate::api::CallerId;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::services::audit;
use crate::utils::validation::{MAX_EMAIL_LEN, MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let users = user::find_all(state.pool()).await?;
    Ok(Json(users))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let found = user::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
    Ok(Json(found))
}

pub async fn create(
    State(state): State<ServerState>,
    caller: CallerId,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_required_text(&payload.full_name, "full_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    if !payload.email.contains('@') {
        return Err(AppError::validation("email must contain '@'"));
    }

    let created = user::create(state.pool(), payload).await?;

    audit::record_created(
        state.pool(),
        caller.0,
        AuditAction::UserCreated,
        "user",
        created.id,
        &created,
    )
    .await;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn set_status(
    State(state): State<ServerState>,
    caller: CallerId,
    Path(id): Path<i64>,
    Json(payload): Json<UserStatusUpdate>,
) -> AppResult<Json<User>> {
    let before = user::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

    user::set_status(state.pool(), id, payload.status).await?;

    let after = user::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::internal("User vanished after status change"))?;

    audit::record(
        state.pool(),
        caller.0,
        AuditAction::UserStatusChanged,
        "user",
        Some(id),
        Some(&before),
        Some(&after),
    )
    .await;

    Ok(Json(after))
}
