//! Attendance endpoints (bearer session required)

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{AttendanceFlag, AttendanceRecord};

use crate::auth::AdminSession;
use crate::service::attendance;
use crate::state::AppState;

use super::ApiResult;

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    /// Kept as text so a malformed day maps to `InvalidAttendanceDay`
    pub day: Option<String>,
    #[serde(default)]
    pub ids: String,
}

/// POST /api/attendance
pub async fn record_attendance(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(record): Json<AttendanceRecord>,
) -> Result<ApiResponse<()>, AppError> {
    attendance::record(state.store.as_ref(), &record, state.event_days).await?;
    tracing::debug!(actor = session.actor(), "Attendance updated");
    Ok(ApiResponse::ok())
}

/// GET /api/attendance?day=N&ids=1,2,3
pub async fn get_attendance(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> ApiResult<Vec<AttendanceFlag>> {
    let day = query
        .day
        .as_deref()
        .and_then(|d| d.trim().parse::<i32>().ok())
        .ok_or_else(|| AppError::new(ErrorCode::InvalidAttendanceDay))?;
    let ids = attendance::parse_ids(&query.ids);

    let flags = attendance::flags_for_day(state.store.as_ref(), day, &ids, state.event_days).await?;
    Ok(Json(flags))
}
