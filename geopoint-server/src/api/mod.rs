//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness and component checks
//! - [`users`] - user management
//! - [`work_schedules`] - schedule catalogue
//! - [`locations`] - geofence zones
//! - [`time_entries`] - punch recording and history
//! - [`requests`] - HR request lifecycle
//! - [`attachments`] - attachment upload/download
//! - [`audit_logs`] - audit trail queries

pub mod caller;

pub mod attachments;
pub mod audit_logs;
pub mod health;
pub mod locations;
pub mod requests;
pub mod time_entries;
pub mod users;
pub mod work_schedules;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use caller::CallerId;

/// Request ID generator (UUID v4 per request)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(work_schedules::router())
        .merge(locations::router())
        .merge(time_entries::router())
        .merge(requests::router())
        .merge(attachments::router())
        .merge(audit_logs::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // Propagate must run inside Set so the generated id is already
        // on the request when it is copied to the response.
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .with_state(state)
}
