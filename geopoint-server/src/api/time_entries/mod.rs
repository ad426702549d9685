//! Time Entry API Module
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/time-entries | POST | Record a punch |
//! | /api/time-entries/user/{id} | GET | Recent punches for a user |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/time-entries", post(handler::record))
        .route("/api/time-entries/user/{id}", get(handler::list_for_user))
}
