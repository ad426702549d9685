//! GeoPoint Server - geolocation-gated time and attendance
//!
//! # Overview
//!
//! Employees punch in and out through a geofence check, and file HR
//! requests (medical certificates, forgotten punches, vacations) that
//! reviewers accept or reject under department-level rules.
//!
//! # Module structure
//!
//! ```text
//! geopoint-server/src/
//! ├── core/      # Configuration, state, server lifecycle
//! ├── api/       # HTTP routes and handlers
//! ├── services/  # Business rules (punch, lifecycle, geofence, blob)
//! ├── db/        # SQLite pool, migrations, repositories
//! └── utils/     # Errors, logging, time and validation helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
