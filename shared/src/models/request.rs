//! Request Model (HR requests + attachments)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// Medical certificate - requires proof attachment
    Certificate,
    ForgotPunch,
    /// Requires 30-day lead time
    Vacation,
}

/// Request status - PENDING is the only non-terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::str::FromStr for RequestType {
    type Err = String;

    // Wire form, matching the serde representation (multipart fields
    // arrive as plain text).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CERTIFICATE" => Ok(Self::Certificate),
            "FORGOT_PUNCH" => Ok(Self::ForgotPunch),
            "VACATION" => Ok(Self::Vacation),
            other => Err(format!("unknown request type: {other}")),
        }
    }
}

/// HR request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Request {
    pub id: i64,
    pub requester_id: i64,
    pub reviewer_id: Option<i64>,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub request_type: RequestType,
    /// Date the request is about (vacation start, missed punch day, …)
    pub target_date: NaiveDate,
    pub status: RequestStatus,
    pub justification_user: Option<String>,
    pub justification_reviewer: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<i64>,
    pub created_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Attachment row - the file body lives in the blob store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Attachment {
    pub id: i64,
    pub request_id: i64,
    /// Original filename as uploaded
    pub file_name: String,
    /// Opaque blob-store reference
    pub blob_ref: String,
    pub content_type: Option<String>,
    pub is_deleted: bool,
    pub created_at: i64,
}

/// Create request payload (multipart text fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCreate {
    pub requester_id: i64,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub target_date: NaiveDate,
    pub justification: Option<String>,
}

/// Review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestReview {
    pub reviewer_id: i64,
    pub new_status: RequestStatus,
    pub comment: Option<String>,
}

/// Update payload (pending requests only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestUpdate {
    pub target_date: NaiveDate,
    pub justification: Option<String>,
}

/// Create response
///
/// The request row is durable once this is returned; attachments that
/// failed to store are listed by filename and can be retried through the
/// attachments API without re-creating the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCreated {
    pub request: Request,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachment_errors: Vec<String>,
}
