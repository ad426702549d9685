//! Attachment API Module
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/attachments | POST | Attach a file to a pending request (retry path) |
//! | /api/attachments/{id} | GET | Download the file body |

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::core::ServerState;

const BODY_LIMIT: usize = 20 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/attachments",
            post(handler::upload).layer(DefaultBodyLimit::max(BODY_LIMIT)),
        )
        .route("/api/attachments/{id}", get(handler::download))
}
