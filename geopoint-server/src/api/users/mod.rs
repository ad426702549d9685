//! User API Module
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/users | GET | List all users |
//! | /api/users | POST | Create a user |
//! | /api/users/{id} | GET | Fetch one user |
//! | /api/users/{id}/status | PUT | Change employment status |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::set_status))
}
