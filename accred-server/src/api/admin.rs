//! Review dashboard endpoints (bearer session required)

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Accreditation, AccreditationFilter, AccreditationStatus, Area, Zone};

use crate::auth::AdminSession;
use crate::service::dashboard::{self, BulkStatusOutcome, NotificationOutcome};
use crate::service::{attendance, export};
use crate::state::AppState;

use super::ApiResult;

/// Dashboard filters. Empty values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub area: Option<String>,
    pub status: Option<String>,
    pub day: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ListQuery {
    fn filter(&self) -> Result<AccreditationFilter, AppError> {
        let area = non_empty(&self.area)
            .map(|raw| Area::parse(raw).ok_or_else(|| AppError::validation(format!("Unknown area: {raw}"))))
            .transpose()?;
        let status = non_empty(&self.status)
            .map(|raw| {
                AccreditationStatus::parse(raw)
                    .ok_or_else(|| AppError::validation(format!("Unknown status: {raw}")))
            })
            .transpose()?;
        Ok(AccreditationFilter { area, status })
    }

    fn query(&self) -> Option<&str> {
        non_empty(&self.q)
    }
}

/// Accreditation row with the attendance flag of the requested day
#[derive(Debug, Serialize)]
pub struct AccreditationView {
    #[serde(flatten)]
    pub accreditation: Accreditation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: AccreditationStatus,
    #[serde(default)]
    pub zone: Option<Zone>,
}

#[derive(Debug, Deserialize)]
pub struct ZoneUpdate {
    pub zone: Option<Zone>,
}

#[derive(Debug, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct BulkStatusRequest {
    #[serde(default)]
    pub ids: Vec<i64>,
    pub status: AccreditationStatus,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteOutcome {
    pub deleted: u64,
}

/// GET /api/admin/accreditations
pub async fn list_accreditations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<AccreditationView>> {
    let filter = query.filter()?;
    let day = non_empty(&query.day)
        .map(|raw| {
            raw.parse::<i32>()
                .map_err(|_| AppError::new(ErrorCode::InvalidAttendanceDay))
                .and_then(|d| attendance::check_day(d, state.event_days))
        })
        .transpose()?;

    let rows = dashboard::search(state.store.as_ref(), &filter, query.query()).await?;

    let present: Option<HashMap<i64, bool>> = match day {
        Some(day) => {
            let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
            let flags = attendance::flags_for_day(state.store.as_ref(), day, &ids, state.event_days).await?;
            Some(flags.into_iter().map(|f| (f.accreditation_id, f.present)).collect())
        }
        None => None,
    };

    let views = rows
        .into_iter()
        .map(|accreditation| AccreditationView {
            present: present
                .as_ref()
                .map(|flags| flags.get(&accreditation.id).copied().unwrap_or(false)),
            accreditation,
        })
        .collect();
    Ok(Json(views))
}

/// GET /api/admin/accreditations/export
pub async fn export_accreditations(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let filter = query.filter()?;
    let rows = dashboard::search(state.store.as_ref(), &filter, query.query()).await?;

    let csv = export::export_csv(&rows, state.export_offset).map_err(|e| {
        tracing::error!("CSV export failed: {e}");
        AppError::internal(format!("CSV export failed: {e}"))
    })?;
    tracing::info!(actor = session.actor(), rows = rows.len(), "Accreditations exported");

    let file_name = export::export_file_name(chrono::Utc::now());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// PATCH /api/admin/accreditations/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
    Json(req): Json<StatusUpdate>,
) -> ApiResult<Accreditation> {
    let updated =
        dashboard::change_status(state.store.as_ref(), session.actor(), id, req.status, req.zone)
            .await?;
    Ok(Json(updated))
}

/// PATCH /api/admin/accreditations/{id}/zone
pub async fn update_zone(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
    Json(req): Json<ZoneUpdate>,
) -> ApiResult<Accreditation> {
    let updated = dashboard::assign_zone(state.store.as_ref(), session.actor(), id, req.zone).await?;
    Ok(Json(updated))
}

/// DELETE /api/admin/accreditations/{id}
pub async fn delete_accreditation(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    dashboard::delete(state.store.as_ref(), session.actor(), id).await?;
    Ok(ApiResponse::ok())
}

/// POST /api/admin/accreditations/bulk-status
pub async fn bulk_update_status(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(req): Json<BulkStatusRequest>,
) -> ApiResult<BulkStatusOutcome> {
    let outcome =
        dashboard::bulk_change_status(state.store.as_ref(), session.actor(), &req.ids, req.status)
            .await?;
    Ok(Json(outcome))
}

/// POST /api/admin/accreditations/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(req): Json<Selection>,
) -> ApiResult<BulkDeleteOutcome> {
    let deleted = dashboard::bulk_delete(state.store.as_ref(), session.actor(), &req.ids).await?;
    Ok(Json(BulkDeleteOutcome { deleted }))
}

/// POST /api/admin/accreditations/{id}/notify
pub async fn notify(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    dashboard::notify(state.store.as_ref(), state.mailer.as_ref(), session.actor(), id).await?;
    Ok(ApiResponse::ok())
}

/// POST /api/admin/notifications
pub async fn notify_batch(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(req): Json<Selection>,
) -> ApiResult<NotificationOutcome> {
    let outcome =
        dashboard::notify_batch(state.store.as_ref(), state.mailer.as_ref(), session.actor(), &req.ids)
            .await?;
    Ok(Json(outcome))
}
