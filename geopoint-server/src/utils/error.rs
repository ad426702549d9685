//! Unified error handling
//!
//! [`AppError`] carries the full business-rule taxonomy plus the system
//! categories, and maps each variant to an HTTP status and stable error
//! code in its `IntoResponse` impl.
//!
//! # Error code scheme
//!
//! | Prefix | Category | HTTP |
//! |--------|----------|------|
//! | E1xxx  | Time-entry rules | 4xx |
//! | E2xxx  | Request-lifecycle rules | 4xx |
//! | E0xxx  | Generic lookup/validation | 4xx |
//! | E9xxx  | System/dependency | 5xx |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Error payload returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable error code
    pub code: &'static str,
    /// Human-readable message
    pub message: String,
    /// Extra diagnostics (e.g. submitted coordinates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Time-entry rules ==========
    #[error("User not found")]
    UserNotFound,

    /// Second punch within the 60 s cooldown window
    #[error("Punch rejected: wait at least one minute between punches")]
    TooSoon,

    #[error("No work location configured for this user")]
    NoZonesConfigured,

    /// Maps to 403; the response surfaces the submitted coordinates
    #[error("You are outside every permitted work location")]
    OutsideGeofence { latitude: f64, longitude: f64 },

    #[error("Open shift exceeds 12 hours; ask a manager to adjust it")]
    ShiftTooLong,

    // ========== Request-lifecycle rules ==========
    #[error("Attachment '{0}' exceeds the 15 MB limit")]
    AttachmentTooLarge(String),

    #[error("Attachment extension '{0}' is not allowed (pdf, jpg, jpeg, png)")]
    AttachmentTypeRejected(String),

    #[error("You already have 3 pending requests; wait for review")]
    TooManyPending,

    #[error("Medical certificate requests require a proof attachment")]
    ProofRequired,

    #[error("Vacation requests need at least 30 days of lead time")]
    InsufficientLeadTime,

    #[error("This request was already finalized and cannot change")]
    AlreadyFinalized,

    #[error("Invalid reviewer")]
    InvalidReviewer,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Conflict of interest: you cannot review your own request")]
    SelfReviewForbidden,

    #[error("A comment is required when rejecting a request")]
    CommentRequired,

    #[error("Contingency limit: more than 25% of the department would be absent on this date")]
    ContingencyLimitExceeded,

    // ========== Generic ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== System (5xx) ==========
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn dependency(msg: impl Into<String>) -> Self {
        Self::DependencyUnavailable(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable code per variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound => "E1001",
            Self::TooSoon => "E1002",
            Self::NoZonesConfigured => "E1003",
            Self::OutsideGeofence { .. } => "E1004",
            Self::ShiftTooLong => "E1005",
            Self::AttachmentTooLarge(_) => "E2001",
            Self::AttachmentTypeRejected(_) => "E2002",
            Self::TooManyPending => "E2003",
            Self::ProofRequired => "E2004",
            Self::InsufficientLeadTime => "E2005",
            Self::AlreadyFinalized => "E2006",
            Self::InvalidReviewer => "E2007",
            Self::Forbidden(_) => "E2008",
            Self::SelfReviewForbidden => "E2009",
            Self::CommentRequired => "E2010",
            Self::ContingencyLimitExceeded => "E2011",
            Self::NotFound(_) => "E0003",
            Self::Conflict(_) => "E0004",
            Self::Validation(_) => "E0002",
            Self::DependencyUnavailable(_) => "E9003",
            Self::Database(_) => "E9002",
            Self::Internal(_) => "E9001",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TooSoon => StatusCode::TOO_MANY_REQUESTS,
            Self::NoZonesConfigured
            | Self::AttachmentTooLarge(_)
            | Self::AttachmentTypeRejected(_)
            | Self::InvalidReviewer
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::OutsideGeofence { .. } | Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::ShiftTooLong
            | Self::TooManyPending
            | Self::ProofRequired
            | Self::InsufficientLeadTime
            | Self::CommentRequired
            | Self::ContingencyLimitExceeded => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AlreadyFinalized | Self::SelfReviewForbidden | Self::Conflict(_) => {
                StatusCode::CONFLICT
            }
            Self::DependencyUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            // Submitted coordinates are surfaced for diagnostics
            Self::OutsideGeofence {
                latitude,
                longitude,
            } => Some(serde_json::json!({
                "your_coords": { "latitude": latitude, "longitude": longitude }
            })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // 5xx details stay in the server log, not the response body
        let message = match &self {
            Self::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                "Database error".to_string()
            }
            Self::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            code,
            message,
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => Self::NotFound(msg),
            RepoError::Duplicate(msg) => Self::Conflict(msg),
            RepoError::Validation(msg) => Self::Validation(msg),
            RepoError::Database(msg) => Self::Database(msg),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
