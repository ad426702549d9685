//! Work Schedule API Module
//!
//! The catalogue is compile-time-known; this is a read-only listing.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/work-schedules", get(handler::list))
}
