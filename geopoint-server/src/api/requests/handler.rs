//! Request API Handlers
//!
//! Create arrives as multipart: text fields `requester_id`, `type`,
//! `target_date`, `justification`, plus any number of file parts named
//! `attachments`. Everything else is JSON.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use shared::models::{
    Request, RequestCreate, RequestCreated, RequestReview, RequestUpdate,
};

use crate::api::CallerId;
use crate::core::ServerState;
use crate::db::repository::request;
use crate::services::request_lifecycle::{
    AttachmentUpload, create_request, delete_request, get_request, review_request, update_request,
};
use crate::utils::time::parse_date;
use crate::utils::{AppError, AppResult};

struct CreateForm {
    data: RequestCreate,
    uploads: Vec<AttachmentUpload>,
}

async fn read_create_form(mut multipart: Multipart) -> AppResult<CreateForm> {
    let mut requester_id = None;
    let mut request_type = None;
    let mut target_date = None;
    let mut justification = None;
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "requester_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(e.to_string()))?;
                requester_id = Some(text.trim().parse::<i64>().map_err(|_| {
                    AppError::validation(format!("requester_id is not a number: {text}"))
                })?);
            }
            "type" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(e.to_string()))?;
                request_type = Some(text.trim().parse().map_err(AppError::Validation)?);
            }
            "target_date" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(e.to_string()))?;
                target_date = Some(parse_date(text.trim())?);
            }
            "justification" => {
                justification = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(e.to_string()))?,
                );
            }
            "attachments" => {
                let file_name = field.file_name().unwrap_or("attachment").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Upload truncated: {e}")))?;
                uploads.push(AttachmentUpload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(CreateForm {
        data: RequestCreate {
            requester_id: requester_id
                .ok_or_else(|| AppError::validation("requester_id is required"))?,
            request_type: request_type.ok_or_else(|| AppError::validation("type is required"))?,
            target_date: target_date
                .ok_or_else(|| AppError::validation("target_date is required"))?,
            justification,
        },
        uploads,
    })
}

pub async fn create(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<RequestCreated>)> {
    let form = read_create_form(multipart).await?;
    let created = create_request(
        state.pool(),
        state.clock.as_ref(),
        state.blob.as_ref(),
        form.data,
        form.uploads,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Request>> {
    Ok(Json(get_request(state.pool(), id).await?))
}

pub async fn review(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RequestReview>,
) -> AppResult<Json<Request>> {
    Ok(Json(review_request(state.pool(), id, payload).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    caller: CallerId,
    Path(id): Path<i64>,
    Json(payload): Json<RequestUpdate>,
) -> AppResult<Json<Request>> {
    Ok(Json(
        update_request(state.pool(), state.clock.as_ref(), caller.0, id, payload).await?,
    ))
}

pub async fn delete(
    State(state): State<ServerState>,
    caller: CallerId,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    delete_request(state.pool(), state.clock.as_ref(), caller.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Request>>> {
    if crate::db::repository::user::find_by_id(state.pool(), user_id)
        .await?
        .is_none()
    {
        return Err(AppError::UserNotFound);
    }
    let mut requests = request::list_by_requester(state.pool(), user_id).await?;
    for req in &mut requests {
        req.attachments = request::attachments_for_request(state.pool(), req.id).await?;
    }
    Ok(Json(requests))
}

pub async fn list_pending(State(state): State<ServerState>) -> AppResult<Json<Vec<Request>>> {
    Ok(Json(request::list_pending(state.pool()).await?))
}
