//! Request API Module
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/requests | POST | Create (multipart, files under `attachments`) |
//! | /api/requests/{id} | GET | Fetch with attachments |
//! | /api/requests/{id} | PUT | Edit a pending request |
//! | /api/requests/{id} | DELETE | Soft-delete a pending request |
//! | /api/requests/{id}/review | PUT | Accept or reject |
//! | /api/requests/user/{user_id} | GET | A requester's own requests |
//! | /api/requests/pending | GET | Review queue, oldest first |

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::core::ServerState;

// 15 MB per attachment plus multipart framing headroom.
const BODY_LIMIT: usize = 64 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/requests", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            post(handler::create).layer(DefaultBodyLimit::max(BODY_LIMIT)),
        )
        .route("/pending", get(handler::list_pending))
        .route("/user/{user_id}", get(handler::list_for_user))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/review", put(handler::review))
}
