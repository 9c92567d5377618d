//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`,
//! closed sets map to Postgres enum types via `sqlx::Type`.

pub mod accreditation;
pub mod area;
pub mod attendance;
pub mod zone;

// Re-exports
pub use accreditation::*;
pub use area::*;
pub use attendance::*;
pub use zone::*;
