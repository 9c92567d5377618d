//! Attendance Model

use serde::{Deserialize, Serialize};

/// Presence of one accreditation on one event day.
/// Unique per `(accreditation_id, day)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceRecord {
    pub accreditation_id: i64,
    /// Event day, 1-based
    pub day: i32,
    pub present: bool,
}

/// Attendance flag returned for a day query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceFlag {
    pub accreditation_id: i64,
    pub present: bool,
}
