//! Shared types for the accreditation service
//!
//! Domain models (areas, zones, statuses, accreditation requests and
//! attendance records), the unified error system and small text utilities
//! used by the server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
