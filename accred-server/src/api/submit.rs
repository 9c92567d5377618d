//! Public accreditation form endpoint

use axum::{Json, extract::State, http::StatusCode};
use shared::error::AppError;
use shared::models::Accreditation;

use crate::service::submission::{self, SubmissionRequest};
use crate::state::AppState;

/// POST /api/accreditations
pub async fn submit_accreditation(
    State(state): State<AppState>,
    Json(req): Json<SubmissionRequest>,
) -> Result<(StatusCode, Json<Accreditation>), AppError> {
    let created = submission::submit(state.store.as_ref(), &req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
