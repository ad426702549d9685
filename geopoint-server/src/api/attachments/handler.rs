//! Attachment API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use shared::models::Attachment;

use crate::core::ServerState;
use crate::db::repository::request;
use crate::services::request_lifecycle::{AttachmentUpload, add_attachment};
use crate::utils::{AppError, AppResult};

pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Attachment>)> {
    let mut request_id = None;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "request_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(e.to_string()))?;
                request_id = Some(text.trim().parse::<i64>().map_err(|_| {
                    AppError::validation(format!("request_id is not a number: {text}"))
                })?);
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("attachment").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Upload truncated: {e}")))?;
                upload = Some(AttachmentUpload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    let request_id =
        request_id.ok_or_else(|| AppError::validation("request_id is required"))?;
    let upload = upload.ok_or_else(|| AppError::validation("file is required"))?;

    let attachment =
        add_attachment(state.pool(), state.blob.as_ref(), request_id, upload).await?;
    Ok((StatusCode::CREATED, Json(attachment)))
}

pub async fn download(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let attachment = request::find_attachment_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Attachment {id} not found")))?;

    let body = state.blob.load(&attachment.blob_ref)?;

    let content_type = attachment
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!("attachment; filename=\"{}\"", attachment.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
