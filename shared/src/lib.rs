//! Shared types for the GeoPoint platform
//!
//! Data models, enums and payload DTOs used by the server and by API
//! consumers, plus id/time utilities. DB row derives are feature-gated
//! behind `db` so frontends can depend on this crate without sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
