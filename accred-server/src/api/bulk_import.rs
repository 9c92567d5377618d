//! Bulk upload API
//!
//! POST /api/bulk-accreditations: multipart `file` (CSV or spreadsheet)
//! GET  /api/bulk-accreditations: XLSX template download

use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};

use crate::import::{self, ImportSummary, MAX_UPLOAD_BYTES, TEMPLATE_FILE_NAME};
use crate::state::AppState;

use super::ApiResult;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::FileTooLarge).with_detail("max_bytes", MAX_UPLOAD_BYTES)
    } else {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
    }
}

/// POST /api/bulk-accreditations
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<ImportSummary> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name = String::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            file_name = field.file_name().unwrap_or_default().to_string();
            file_data = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            break;
        }
    }

    let data = file_data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;

    let summary = import::import_file(state.store.as_ref(), &file_name, &data).await?;
    Ok(axum::Json(summary))
}

/// GET /api/bulk-accreditations
pub async fn download_template() -> Result<Response, AppError> {
    let bytes = import::template_workbook().map_err(|e| {
        tracing::error!("Template generation failed: {e}");
        AppError::internal(format!("Template generation failed: {e}"))
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{TEMPLATE_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
