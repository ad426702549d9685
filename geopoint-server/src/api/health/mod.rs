//! Health check routes
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/health | GET | Liveness plus a database round-trip |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(handler::health))
}
