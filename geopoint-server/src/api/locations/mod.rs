//! Location API Module (geofence zones)
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/locations | GET | List all zones |
//! | /api/locations | POST | Register a zone |
//!
//! Zones are immutable once created; there is no update or delete.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/locations", get(handler::list).post(handler::create))
}
