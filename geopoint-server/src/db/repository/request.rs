//! Request Repository
//!
//! Every mutation on a request is guarded by its current status in the
//! WHERE clause, so concurrent reviewers/editors race on rows_affected
//! instead of clobbering each other.

use chrono::NaiveDate;
use sqlx::SqliteExecutor;

use shared::models::{
    Attachment, Department, Request, RequestStatus, RequestType,
};
use shared::util::{now_millis, snowflake_id};

use super::RepoResult;

const COLUMNS: &str = "id, requester_id, reviewer_id, type, target_date, status, \
                       justification_user, justification_reviewer, is_deleted, \
                       deleted_at, created_at";

#[derive(Debug, Clone)]
pub struct NewRequest {
    pub requester_id: i64,
    pub request_type: RequestType,
    pub target_date: NaiveDate,
    pub justification: Option<String>,
}

pub async fn insert(
    executor: impl SqliteExecutor<'_>,
    data: NewRequest,
) -> RepoResult<Request> {
    let request = Request {
        id: snowflake_id(),
        requester_id: data.requester_id,
        reviewer_id: None,
        request_type: data.request_type,
        target_date: data.target_date,
        status: RequestStatus::Pending,
        justification_user: data.justification,
        justification_reviewer: None,
        is_deleted: false,
        deleted_at: None,
        created_at: now_millis(),
        attachments: Vec::new(),
    };

    sqlx::query(
        "INSERT INTO request (id, requester_id, type, target_date, status, justification_user, is_deleted, created_at)
         VALUES (?, ?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(request.id)
    .bind(request.requester_id)
    .bind(request.request_type)
    .bind(request.target_date)
    .bind(request.status)
    .bind(request.justification_user.as_deref())
    .bind(request.created_at)
    .execute(executor)
    .await?;

    Ok(request)
}

/// Fetch by id including soft-deleted rows. Attachments are not loaded.
pub async fn find_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<Request>> {
    let request = sqlx::query_as::<_, Request>(&format!(
        "SELECT {COLUMNS} FROM request WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(request)
}

/// Fetch by id, treating soft-deleted rows as absent.
pub async fn find_active_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<Request>> {
    let request = sqlx::query_as::<_, Request>(&format!(
        "SELECT {COLUMNS} FROM request WHERE id = ? AND is_deleted = 0"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(request)
}

pub async fn count_pending_by_requester(
    executor: impl SqliteExecutor<'_>,
    requester_id: i64,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM request WHERE requester_id = ? AND status = 'PENDING' AND is_deleted = 0",
    )
    .bind(requester_id)
    .fetch_one(executor)
    .await?;
    Ok(count)
}

/// Accepted vacations of a department landing on a given day, for the
/// contingency ratio.
pub async fn count_accepted_vacations_on_date(
    executor: impl SqliteExecutor<'_>,
    department: Department,
    target_date: NaiveDate,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM request r
         JOIN user u ON u.id = r.requester_id
         WHERE u.department = ?
           AND r.type = 'VACATION'
           AND r.status = 'ACCEPTED'
           AND r.target_date = ?
           AND r.is_deleted = 0",
    )
    .bind(department)
    .bind(target_date)
    .fetch_one(executor)
    .await?;
    Ok(count)
}

/// Move a PENDING request to a terminal status. Returns the number of
/// rows touched; 0 means somebody finalized it first.
pub async fn finalize(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    new_status: RequestStatus,
    reviewer_id: i64,
    comment: Option<&str>,
) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE request SET status = ?, reviewer_id = ?, justification_reviewer = ?
         WHERE id = ? AND status = 'PENDING' AND is_deleted = 0",
    )
    .bind(new_status)
    .bind(reviewer_id)
    .bind(comment)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Edit target date and justification while still PENDING.
pub async fn update_pending(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    target_date: NaiveDate,
    justification: Option<&str>,
) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE request SET target_date = ?, justification_user = ?
         WHERE id = ? AND status = 'PENDING' AND is_deleted = 0",
    )
    .bind(target_date)
    .bind(justification)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Soft-delete a PENDING request.
pub async fn soft_delete(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    deleted_at: i64,
) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE request SET is_deleted = 1, deleted_at = ?
         WHERE id = ? AND status = 'PENDING' AND is_deleted = 0",
    )
    .bind(deleted_at)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn soft_delete_attachments(
    executor: impl SqliteExecutor<'_>,
    request_id: i64,
) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE attachment SET is_deleted = 1 WHERE request_id = ? AND is_deleted = 0",
    )
    .bind(request_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// A requester's own requests, newest target date first.
pub async fn list_by_requester(
    executor: impl SqliteExecutor<'_>,
    requester_id: i64,
) -> RepoResult<Vec<Request>> {
    let requests = sqlx::query_as::<_, Request>(&format!(
        "SELECT {COLUMNS} FROM request WHERE requester_id = ? AND is_deleted = 0
         ORDER BY target_date DESC, id DESC"
    ))
    .bind(requester_id)
    .fetch_all(executor)
    .await?;
    Ok(requests)
}

/// Review queue, nearest target date first.
pub async fn list_pending(executor: impl SqliteExecutor<'_>) -> RepoResult<Vec<Request>> {
    let requests = sqlx::query_as::<_, Request>(&format!(
        "SELECT {COLUMNS} FROM request WHERE status = 'PENDING' AND is_deleted = 0
         ORDER BY target_date ASC, id ASC"
    ))
    .fetch_all(executor)
    .await?;
    Ok(requests)
}

#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub request_id: i64,
    pub file_name: String,
    pub blob_ref: String,
    pub content_type: Option<String>,
}

pub async fn insert_attachment(
    executor: impl SqliteExecutor<'_>,
    data: NewAttachment,
) -> RepoResult<Attachment> {
    let attachment = Attachment {
        id: snowflake_id(),
        request_id: data.request_id,
        file_name: data.file_name,
        blob_ref: data.blob_ref,
        content_type: data.content_type,
        is_deleted: false,
        created_at: now_millis(),
    };

    sqlx::query(
        "INSERT INTO attachment (id, request_id, file_name, blob_ref, content_type, is_deleted, created_at)
         VALUES (?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(attachment.id)
    .bind(attachment.request_id)
    .bind(&attachment.file_name)
    .bind(&attachment.blob_ref)
    .bind(attachment.content_type.as_deref())
    .bind(attachment.created_at)
    .execute(executor)
    .await?;

    Ok(attachment)
}

pub async fn find_attachment_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<Attachment>> {
    let attachment = sqlx::query_as::<_, Attachment>(
        "SELECT id, request_id, file_name, blob_ref, content_type, is_deleted, created_at
         FROM attachment WHERE id = ? AND is_deleted = 0",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(attachment)
}

pub async fn attachments_for_request(
    executor: impl SqliteExecutor<'_>,
    request_id: i64,
) -> RepoResult<Vec<Attachment>> {
    let attachments = sqlx::query_as::<_, Attachment>(
        "SELECT id, request_id, file_name, blob_ref, content_type, is_deleted, created_at
         FROM attachment WHERE request_id = ? AND is_deleted = 0 ORDER BY created_at ASC",
    )
    .bind(request_id)
    .fetch_all(executor)
    .await?;
    Ok(attachments)
}
