//! Data models
//!
//! Shared between geopoint-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-generated).
//! Enums are stored as SCREAMING_SNAKE_CASE TEXT.

pub mod audit_log;
pub mod location;
pub mod request;
pub mod time_entry;
pub mod user;
pub mod work_schedule;

// Re-exports
pub use audit_log::*;
pub use location::*;
pub use request::*;
pub use time_entry::*;
pub use user::*;
pub use work_schedule::*;
