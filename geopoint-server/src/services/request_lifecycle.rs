//! Request lifecycle
//!
//! Create, review, update and delete for HR requests. Reviews and
//! deletes run inside a single transaction and finish with a
//! status-guarded UPDATE, so two concurrent reviewers cannot both
//! finalize the same request.

use sqlx::SqlitePool;
use tracing::info;

use shared::models::{
    AuditAction, Request, RequestCreate, RequestCreated, RequestReview, RequestStatus,
    RequestType, RequestUpdate, UserStatus,
};

use crate::db::repository::request::{self, NewAttachment, NewRequest};
use crate::db::repository::user;
use crate::services::{audit, blob::BlobStore, clock::Clock};
use crate::utils::validation::{MAX_JUSTIFICATION_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// Hard cap per attachment body.
pub const MAX_ATTACHMENT_BYTES: usize = 15 * 1024 * 1024;

/// Accepted attachment extensions (case-insensitive).
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// A requester may hold at most this many open requests.
pub const MAX_PENDING_PER_REQUESTER: i64 = 3;

/// Vacations must be filed at least this far ahead.
pub const VACATION_LEAD_DAYS: u64 = 30;

/// Share of a department allowed to be on accepted vacation on one day.
pub const CONTINGENCY_RATIO: f64 = 0.25;

/// Uploaded attachment, already read off the wire.
pub struct AttachmentUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

fn check_attachment(upload: &AttachmentUpload) -> AppResult<()> {
    if upload.data.len() > MAX_ATTACHMENT_BYTES {
        return Err(AppError::AttachmentTooLarge(upload.file_name.clone()));
    }
    match extension_of(&upload.file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)) => Ok(()),
        Some(ext) => Err(AppError::AttachmentTypeRejected(ext.to_string())),
        None => Err(AppError::AttachmentTypeRejected(upload.file_name.clone())),
    }
}

fn check_vacation_lead(clock: &dyn Clock, target: chrono::NaiveDate) -> AppResult<()> {
    let earliest = clock.today_utc() + chrono::Days::new(VACATION_LEAD_DAYS);
    if target < earliest {
        return Err(AppError::InsufficientLeadTime);
    }
    Ok(())
}

/// File a new request.
///
/// The request row commits before any blob is written. Attachments that
/// fail to store are reported back by filename instead of failing the
/// whole call; the row is already durable and the files can be uploaded
/// again through the attachments API.
pub async fn create_request(
    pool: &SqlitePool,
    clock: &dyn Clock,
    blob: &dyn BlobStore,
    data: RequestCreate,
    uploads: Vec<AttachmentUpload>,
) -> AppResult<RequestCreated> {
    validate_optional_text(data.justification.as_deref(), "justification", MAX_JUSTIFICATION_LEN)?;

    if user::find_by_id(pool, data.requester_id).await?.is_none() {
        return Err(AppError::UserNotFound);
    }

    // The cap rejects before any type-specific precondition is looked at.
    let pending = request::count_pending_by_requester(pool, data.requester_id).await?;
    if pending >= MAX_PENDING_PER_REQUESTER {
        return Err(AppError::TooManyPending);
    }

    for upload in &uploads {
        check_attachment(upload)?;
    }

    match data.request_type {
        RequestType::Certificate if uploads.is_empty() => return Err(AppError::ProofRequired),
        RequestType::Vacation => check_vacation_lead(clock, data.target_date)?,
        _ => {}
    }

    let mut tx = pool.begin().await?;

    // Re-checked inside the insert transaction, otherwise two
    // concurrent creates could both pass the pool-level count above.
    let pending = request::count_pending_by_requester(&mut *tx, data.requester_id).await?;
    if pending >= MAX_PENDING_PER_REQUESTER {
        return Err(AppError::TooManyPending);
    }

    let mut created = request::insert(
        &mut *tx,
        NewRequest {
            requester_id: data.requester_id,
            request_type: data.request_type,
            target_date: data.target_date,
            justification: data.justification,
        },
    )
    .await?;

    tx.commit().await?;

    let mut attachment_errors = Vec::new();
    for upload in uploads {
        match blob.store(&upload.file_name, &upload.data) {
            Ok(blob_ref) => {
                let attachment = request::insert_attachment(
                    pool,
                    NewAttachment {
                        request_id: created.id,
                        file_name: upload.file_name,
                        blob_ref,
                        content_type: upload.content_type,
                    },
                )
                .await?;
                created.attachments.push(attachment);
            }
            Err(e) => {
                tracing::warn!(
                    request_id = created.id,
                    file = %upload.file_name,
                    error = %e,
                    "Attachment store failed"
                );
                attachment_errors.push(upload.file_name);
            }
        }
    }

    info!(
        request_id = created.id,
        requester_id = created.requester_id,
        r#type = ?created.request_type,
        "Request created"
    );

    audit::record_created(
        pool,
        Some(created.requester_id),
        AuditAction::RequestCreated,
        "request",
        created.id,
        &created,
    )
    .await;

    Ok(RequestCreated {
        request: created,
        attachment_errors,
    })
}

/// Finalize a pending request.
pub async fn review_request(
    pool: &SqlitePool,
    id: i64,
    review: RequestReview,
) -> AppResult<Request> {
    if !review.new_status.is_terminal() {
        return Err(AppError::validation("Review must accept or reject"));
    }

    let mut tx = pool.begin().await?;

    let before = request::find_active_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))?;
    if before.status.is_terminal() {
        return Err(AppError::AlreadyFinalized);
    }

    let reviewer = user::find_by_id(&mut *tx, review.reviewer_id)
        .await?
        .ok_or(AppError::InvalidReviewer)?;
    if !reviewer.job_title.can_review() {
        return Err(AppError::forbidden(
            "Only managers and HR analysts review requests",
        ));
    }

    let requester = user::find_by_id(&mut *tx, before.requester_id)
        .await?
        .ok_or_else(|| AppError::not_found("Requester no longer exists"))?;
    if !reviewer.job_title.bypasses_department_scope()
        && reviewer.department != requester.department
    {
        return Err(AppError::forbidden(
            "Managers review only their own department",
        ));
    }

    if review.reviewer_id == before.requester_id {
        return Err(AppError::SelfReviewForbidden);
    }

    let comment = review.comment.as_deref().map(str::trim).filter(|c| !c.is_empty());
    if review.new_status == RequestStatus::Rejected && comment.is_none() {
        return Err(AppError::CommentRequired);
    }

    if review.new_status == RequestStatus::Accepted
        && before.request_type == RequestType::Vacation
    {
        let dept_total = user::count_in_department(&mut *tx, requester.department).await?;
        let same_day = request::count_accepted_vacations_on_date(
            &mut *tx,
            requester.department,
            before.target_date,
        )
        .await?;
        if dept_total > 0 && (same_day + 1) as f64 / dept_total as f64 > CONTINGENCY_RATIO {
            return Err(AppError::ContingencyLimitExceeded);
        }
    }

    let touched =
        request::finalize(&mut *tx, id, review.new_status, review.reviewer_id, comment).await?;
    if touched == 0 {
        return Err(AppError::AlreadyFinalized);
    }

    // Teams see the absence immediately rather than on the start date.
    if review.new_status == RequestStatus::Accepted
        && before.request_type == RequestType::Vacation
    {
        user::set_status(&mut *tx, before.requester_id, UserStatus::OnVacation).await?;
    }

    let after = request::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::internal("Reviewed request vanished"))?;

    tx.commit().await?;

    info!(
        request_id = id,
        reviewer_id = review.reviewer_id,
        status = ?review.new_status,
        "Request reviewed"
    );

    audit::record(
        pool,
        Some(review.reviewer_id),
        AuditAction::RequestReviewed,
        "request",
        Some(id),
        Some(&before),
        Some(&after),
    )
    .await;

    Ok(after)
}

/// Edit a pending request's target date and justification.
pub async fn update_request(
    pool: &SqlitePool,
    clock: &dyn Clock,
    actor_id: Option<i64>,
    id: i64,
    data: RequestUpdate,
) -> AppResult<Request> {
    validate_optional_text(data.justification.as_deref(), "justification", MAX_JUSTIFICATION_LEN)?;

    let before = request::find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))?;
    if before.status.is_terminal() {
        return Err(AppError::AlreadyFinalized);
    }

    match before.request_type {
        RequestType::Vacation => check_vacation_lead(clock, data.target_date)?,
        _ => {
            // Non-vacation edits may not be backdated.
            if data.target_date <= clock.today_utc() {
                return Err(AppError::InsufficientLeadTime);
            }
        }
    }

    let touched =
        request::update_pending(pool, id, data.target_date, data.justification.as_deref()).await?;
    if touched == 0 {
        return Err(AppError::AlreadyFinalized);
    }

    let after = request::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::internal("Updated request vanished"))?;

    audit::record(
        pool,
        actor_id,
        AuditAction::RequestUpdated,
        "request",
        Some(id),
        Some(&before),
        Some(&after),
    )
    .await;

    Ok(after)
}

/// Soft-delete a pending request and its attachment rows.
pub async fn delete_request(
    pool: &SqlitePool,
    clock: &dyn Clock,
    actor_id: Option<i64>,
    id: i64,
) -> AppResult<()> {
    let before = request::find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))?;
    if before.status.is_terminal() {
        return Err(AppError::AlreadyFinalized);
    }

    let mut tx = pool.begin().await?;
    let touched = request::soft_delete(&mut *tx, id, clock.now_millis()).await?;
    if touched == 0 {
        return Err(AppError::AlreadyFinalized);
    }
    request::soft_delete_attachments(&mut *tx, id).await?;
    tx.commit().await?;

    info!(request_id = id, "Request deleted");

    audit::record::<Request, ()>(
        pool,
        actor_id,
        AuditAction::RequestDeleted,
        "request",
        Some(id),
        Some(&before),
        None,
    )
    .await;

    Ok(())
}

/// Attach a file to an existing pending request.
///
/// This is the retry path for uploads that failed during create. Here a
/// blob-store failure does propagate: there is no request row at stake.
pub async fn add_attachment(
    pool: &SqlitePool,
    blob: &dyn BlobStore,
    request_id: i64,
    upload: AttachmentUpload,
) -> AppResult<shared::models::Attachment> {
    check_attachment(&upload)?;

    let found = request::find_active_by_id(pool, request_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
    if found.status.is_terminal() {
        return Err(AppError::AlreadyFinalized);
    }

    let blob_ref = blob.store(&upload.file_name, &upload.data)?;
    let attachment = request::insert_attachment(
        pool,
        NewAttachment {
            request_id,
            file_name: upload.file_name,
            blob_ref,
            content_type: upload.content_type,
        },
    )
    .await?;

    Ok(attachment)
}

/// Fetch a request with its attachment rows.
pub async fn get_request(pool: &SqlitePool, id: i64) -> AppResult<Request> {
    let mut found = request::find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))?;
    found.attachments = request::attachments_for_request(pool, id).await?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::services::blob::MemoryBlobStore;
    use crate::services::clock::FixedClock;
    use chrono::NaiveDate;

    // 2026-06-01 12:00:00 UTC → today is 2026-06-01
    const NOW: i64 = 1_780_315_200_000;

    fn clock() -> FixedClock {
        FixedClock(NOW)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn seed_user(db: &DbService, id: i64, department: &str, job_title: &str) {
        sqlx::query(
            "INSERT INTO user (id, full_name, email, role, department, job_title, status, work_schedule, created_at)
             VALUES (?, 'U', ?, 'EMPLOYEE', ?, ?, 'ACTIVE', 'COMERCIAL', 0)",
        )
        .bind(id)
        .bind(format!("u{id}@geo.com"))
        .bind(department)
        .bind(job_title)
        .execute(&db.pool)
        .await
        .unwrap();
    }

    fn vacation_create(requester_id: i64, target: &str) -> RequestCreate {
        RequestCreate {
            requester_id,
            request_type: RequestType::Vacation,
            target_date: date(target),
            justification: Some("trip".into()),
        }
    }

    fn pdf(name: &str) -> AttachmentUpload {
        AttachmentUpload {
            file_name: name.into(),
            content_type: Some("application/pdf".into()),
            data: b"%PDF".to_vec(),
        }
    }

    fn accept(reviewer_id: i64) -> RequestReview {
        RequestReview {
            reviewer_id,
            new_status: RequestStatus::Accepted,
            comment: None,
        }
    }

    fn reject(reviewer_id: i64, comment: Option<&str>) -> RequestReview {
        RequestReview {
            reviewer_id,
            new_status: RequestStatus::Rejected,
            comment: comment.map(Into::into),
        }
    }

    #[tokio::test]
    async fn vacation_lead_time_boundary_is_thirty_days() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        let blob = MemoryBlobStore::default();

        // 29 days out fails
        let err = create_request(&db.pool, &clock(), &blob, vacation_create(1, "2026-06-30"), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientLeadTime));

        // Exactly 30 days out passes
        create_request(&db.pool, &clock(), &blob, vacation_create(1, "2026-07-01"), vec![])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn certificate_without_proof_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        let blob = MemoryBlobStore::default();

        let data = RequestCreate {
            requester_id: 1,
            request_type: RequestType::Certificate,
            target_date: date("2026-06-02"),
            justification: None,
        };
        let err = create_request(&db.pool, &clock(), &blob, data.clone(), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProofRequired));

        let created = create_request(&db.pool, &clock(), &blob, data, vec![pdf("cert.pdf")])
            .await
            .unwrap();
        assert_eq!(created.request.attachments.len(), 1);
        assert!(created.attachment_errors.is_empty());
    }

    #[tokio::test]
    async fn attachment_rules_reject_size_and_extension() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        let blob = MemoryBlobStore::default();

        let big = AttachmentUpload {
            file_name: "huge.pdf".into(),
            content_type: None,
            data: vec![0; MAX_ATTACHMENT_BYTES + 1],
        };
        let err = create_request(&db.pool, &clock(), &blob, vacation_create(1, "2026-08-01"), vec![big])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AttachmentTooLarge(_)));

        let exe = AttachmentUpload {
            file_name: "virus.exe".into(),
            content_type: None,
            data: vec![0; 4],
        };
        let err = create_request(&db.pool, &clock(), &blob, vacation_create(1, "2026-08-01"), vec![exe])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AttachmentTypeRejected(_)));

        // Extension check is case-insensitive
        let upper = AttachmentUpload {
            file_name: "SCAN.PNG".into(),
            content_type: None,
            data: vec![0; 4],
        };
        create_request(&db.pool, &clock(), &blob, vacation_create(1, "2026-08-01"), vec![upper])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn fourth_pending_request_is_capped() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        let blob = MemoryBlobStore::default();

        for day in ["2026-07-01", "2026-07-02", "2026-07-03"] {
            create_request(&db.pool, &clock(), &blob, vacation_create(1, day), vec![])
                .await
                .unwrap();
        }

        let err = create_request(&db.pool, &clock(), &blob, vacation_create(1, "2026-07-04"), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TooManyPending));
    }

    #[tokio::test]
    async fn cap_wins_over_type_preconditions() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        let blob = MemoryBlobStore::default();

        for day in ["2026-07-01", "2026-07-02", "2026-07-03"] {
            create_request(&db.pool, &clock(), &blob, vacation_create(1, day), vec![])
                .await
                .unwrap();
        }

        // Tomorrow is well inside the vacation lead window; the cap
        // still rejects first.
        let err = create_request(&db.pool, &clock(), &blob, vacation_create(1, "2026-06-02"), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TooManyPending));
    }

    #[tokio::test]
    async fn blob_outage_keeps_the_request_and_reports_the_file() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        let blob = MemoryBlobStore::failing();

        let created = create_request(
            &db.pool,
            &clock(),
            &blob,
            vacation_create(1, "2026-08-01"),
            vec![pdf("proof.pdf")],
        )
        .await
        .unwrap();

        assert_eq!(created.attachment_errors, vec!["proof.pdf".to_string()]);
        assert!(created.request.attachments.is_empty());

        // The row is durable despite the failed upload
        let stored = get_request(&db.pool, created.request.id).await.unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
    }

    async fn seed_pending_vacation(db: &DbService, requester: i64, target: &str) -> i64 {
        let blob = MemoryBlobStore::default();
        create_request(&db.pool, &clock(), &blob, vacation_create(requester, target), vec![])
            .await
            .unwrap()
            .request
            .id
    }

    #[tokio::test]
    async fn accepting_a_vacation_sets_the_requester_on_vacation() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        seed_user(&db, 2, "IT", "MANAGER").await;
        for id in 3..=6 {
            seed_user(&db, id, "IT", "DEVELOPER").await;
        }
        let id = seed_pending_vacation(&db, 1, "2026-08-01").await;

        let reviewed = review_request(&db.pool, id, accept(2)).await.unwrap();
        assert_eq!(reviewed.status, RequestStatus::Accepted);
        assert_eq!(reviewed.reviewer_id, Some(2));

        let status: String = sqlx::query_scalar("SELECT status FROM user WHERE id = 1")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(status, "ON_VACATION");
    }

    #[tokio::test]
    async fn self_review_is_a_conflict_of_interest() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 2, "IT", "MANAGER").await;
        let id = seed_pending_vacation(&db, 2, "2026-08-01").await;

        let err = review_request(&db.pool, id, reject(2, Some("no"))).await.unwrap_err();
        assert!(matches!(err, AppError::SelfReviewForbidden));
    }

    #[tokio::test]
    async fn rejection_requires_a_comment() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        seed_user(&db, 2, "IT", "MANAGER").await;
        let id = seed_pending_vacation(&db, 1, "2026-08-01").await;

        let err = review_request(&db.pool, id, reject(2, None)).await.unwrap_err();
        assert!(matches!(err, AppError::CommentRequired));

        let err = review_request(&db.pool, id, reject(2, Some("   "))).await.unwrap_err();
        assert!(matches!(err, AppError::CommentRequired));

        let reviewed = review_request(&db.pool, id, reject(2, Some("overlaps release")))
            .await
            .unwrap();
        assert_eq!(reviewed.status, RequestStatus::Rejected);
        assert_eq!(reviewed.justification_reviewer.as_deref(), Some("overlaps release"));
    }

    #[tokio::test]
    async fn reviewer_must_exist_and_hold_a_reviewing_title() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        seed_user(&db, 3, "IT", "DEVELOPER").await;
        let id = seed_pending_vacation(&db, 1, "2026-08-01").await;

        let err = review_request(&db.pool, id, accept(99)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidReviewer));

        let err = review_request(&db.pool, id, accept(3)).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn managers_are_scoped_to_their_department_but_hr_is_not() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        seed_user(&db, 2, "SALES", "MANAGER").await;
        seed_user(&db, 3, "HR", "HR_ANALYST").await;
        for id in 4..=7 {
            seed_user(&db, id, "IT", "DEVELOPER").await;
        }
        let id = seed_pending_vacation(&db, 1, "2026-08-01").await;

        let err = review_request(&db.pool, id, accept(2)).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let reviewed = review_request(&db.pool, id, accept(3)).await.unwrap();
        assert_eq!(reviewed.status, RequestStatus::Accepted);
    }

    #[tokio::test]
    async fn finalized_requests_are_immutable() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        seed_user(&db, 2, "IT", "MANAGER").await;
        for id in 3..=6 {
            seed_user(&db, id, "IT", "DEVELOPER").await;
        }
        let id = seed_pending_vacation(&db, 1, "2026-08-01").await;
        review_request(&db.pool, id, accept(2)).await.unwrap();

        let err = review_request(&db.pool, id, reject(2, Some("no"))).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyFinalized));

        let update = RequestUpdate {
            target_date: date("2026-09-01"),
            justification: None,
        };
        let err = update_request(&db.pool, &clock(), Some(1), id, update).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyFinalized));

        let err = delete_request(&db.pool, &clock(), Some(1), id).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyFinalized));
    }

    #[tokio::test]
    async fn contingency_quarter_is_inclusive() {
        // Department of 4: one accepted vacation on a date is exactly
        // 25% and allowed; a second on the same date would be 50%.
        let db = DbService::in_memory().await.unwrap();
        for id in 1..=4 {
            seed_user(&db, id, "IT", "DEVELOPER").await;
        }
        seed_user(&db, 9, "HR", "HR_ANALYST").await;

        let first = seed_pending_vacation(&db, 1, "2026-08-01").await;
        review_request(&db.pool, first, accept(9)).await.unwrap();

        let second = seed_pending_vacation(&db, 2, "2026-08-01").await;
        let err = review_request(&db.pool, second, accept(9)).await.unwrap_err();
        assert!(matches!(err, AppError::ContingencyLimitExceeded));

        // A different date is fine
        let third = seed_pending_vacation(&db, 3, "2026-08-10").await;
        review_request(&db.pool, third, accept(9)).await.unwrap();

        // The blocked request can still be rejected
        let reviewed = review_request(&db.pool, second, reject(9, Some("coverage")))
            .await
            .unwrap();
        assert_eq!(reviewed.status, RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn update_revalidates_lead_time_per_type() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        let blob = MemoryBlobStore::default();

        let vacation = seed_pending_vacation(&db, 1, "2026-08-01").await;
        let err = update_request(
            &db.pool,
            &clock(),
            Some(1),
            vacation,
            RequestUpdate {
                target_date: date("2026-06-20"),
                justification: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InsufficientLeadTime));

        let forgot = create_request(
            &db.pool,
            &clock(),
            &blob,
            RequestCreate {
                requester_id: 1,
                request_type: RequestType::ForgotPunch,
                target_date: date("2026-06-02"),
                justification: Some("forgot exit".into()),
            },
            vec![],
        )
        .await
        .unwrap()
        .request
        .id;

        // Today or earlier is rejected, tomorrow is fine
        let err = update_request(
            &db.pool,
            &clock(),
            Some(1),
            forgot,
            RequestUpdate {
                target_date: date("2026-06-01"),
                justification: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InsufficientLeadTime));

        let updated = update_request(
            &db.pool,
            &clock(),
            Some(1),
            forgot,
            RequestUpdate {
                target_date: date("2026-06-02"),
                justification: Some("typo".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.target_date, date("2026-06-02"));
        assert_eq!(updated.justification_user.as_deref(), Some("typo"));
    }

    #[tokio::test]
    async fn retry_upload_attaches_to_a_pending_request_only() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        seed_user(&db, 2, "IT", "MANAGER").await;
        for id in 3..=6 {
            seed_user(&db, id, "IT", "DEVELOPER").await;
        }
        let blob = MemoryBlobStore::default();
        let id = seed_pending_vacation(&db, 1, "2026-08-01").await;

        let attachment = add_attachment(&db.pool, &blob, id, pdf("itinerary.pdf"))
            .await
            .unwrap();
        assert_eq!(attachment.request_id, id);
        assert_eq!(blob.load(&attachment.blob_ref).unwrap(), b"%PDF");

        review_request(&db.pool, id, accept(2)).await.unwrap();
        let err = add_attachment(&db.pool, &blob, id, pdf("late.pdf")).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyFinalized));
    }

    #[tokio::test]
    async fn delete_cascades_to_attachment_rows() {
        let db = DbService::in_memory().await.unwrap();
        seed_user(&db, 1, "IT", "DEVELOPER").await;
        let blob = MemoryBlobStore::default();

        let created = create_request(
            &db.pool,
            &clock(),
            &blob,
            RequestCreate {
                requester_id: 1,
                request_type: RequestType::Certificate,
                target_date: date("2026-06-02"),
                justification: None,
            },
            vec![pdf("cert.pdf")],
        )
        .await
        .unwrap();

        delete_request(&db.pool, &clock(), Some(1), created.request.id)
            .await
            .unwrap();

        let err = get_request(&db.pool, created.request.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let live: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM attachment WHERE request_id = ? AND is_deleted = 0",
        )
        .bind(created.request.id)
        .fetch_one(&db.pool)
        .await
        .unwrap();
        assert_eq!(live, 0);
    }
}
