//! Location API Handlers

use axum::{Json, extract::State, http::StatusCode};

use shared::models::{AuditAction, Location, LocationCreate};

use crate::api::CallerId;
use crate::core::ServerState;
use crate::db::repository::{location, user};
use crate::services::audit;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Location>>> {
    let zones = location::find_all(state.pool()).await?;
    Ok(Json(zones))
}

pub async fn create(
    State(state): State<ServerState>,
    caller: CallerId,
    Json(payload): Json<LocationCreate>,
) -> AppResult<(StatusCode, Json<Location>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if !(-90.0..=90.0).contains(&payload.latitude) {
        return Err(AppError::validation("latitude must be within [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&payload.longitude) {
        return Err(AppError::validation("longitude must be within [-180, 180]"));
    }

    // A personal home-office zone must point at a real user.
    if let Some(owner) = payload.user_id
        && user::find_by_id(state.pool(), owner).await?.is_none()
    {
        return Err(AppError::not_found(format!("User {owner} not found")));
    }

    let created = location::create(state.pool(), payload).await?;

    audit::record_created(
        state.pool(),
        caller.0,
        AuditAction::LocationCreated,
        "location",
        created.id,
        &created,
    )
    .await;

    Ok((StatusCode::CREATED, Json(created)))
}
