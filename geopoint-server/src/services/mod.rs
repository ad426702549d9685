//! Business services
//!
//! Rule enforcement lives here, between the HTTP handlers and the
//! repositories. Handlers parse and translate; services decide.

pub mod audit;
pub mod blob;
pub mod clock;
pub mod geo;
pub mod geofence;
pub mod request_lifecycle;
pub mod time_entry;
