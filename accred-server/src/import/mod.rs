//! Bulk accreditation import
//!
//! `parse_upload` turns a CSV or spreadsheet into [`columns::RawRecord`]s,
//! `validate` splits them into insertable rows and rejected rows, and
//! [`import_file`] runs both and stores the valid rows.

pub mod columns;
pub mod parse;
pub mod template;
pub mod validate;

pub use parse::parse_upload;
pub use template::{TEMPLATE_FILE_NAME, template_workbook};
pub use validate::{InvalidRow, Validation, validate};

use serde::Serialize;
use shared::error::{AppError, ErrorCode};

use crate::db::Datastore;
use crate::error::ServiceError;

/// Upload size limit
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Rejected rows echoed back to the uploader
pub const INVALID_SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub message: String,
    pub inserted: u64,
    pub total_rows: usize,
    pub invalid: usize,
    pub invalid_sample: Vec<InvalidRow>,
}

fn invalid_sample(invalid: &[InvalidRow]) -> Vec<InvalidRow> {
    invalid.iter().take(INVALID_SAMPLE_SIZE).cloned().collect()
}

/// Parse, validate and store an uploaded file.
///
/// Nothing is written unless at least one row is valid; the valid rows are
/// inserted together or not at all.
pub async fn import_file(
    store: &dyn Datastore,
    file_name: &str,
    bytes: &[u8],
) -> Result<ImportSummary, AppError> {
    if bytes.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::new(ErrorCode::FileTooLarge)
            .with_detail("max_bytes", MAX_UPLOAD_BYTES));
    }

    let records = parse_upload(file_name, bytes).map_err(|e| {
        tracing::warn!(file = %file_name, error = %e, "Upload could not be parsed");
        AppError::upstream(ErrorCode::ImportParseFailed, e)
    })?;

    if records.is_empty() {
        return Err(AppError::new(ErrorCode::ImportNoRecords));
    }

    let Validation { valid, invalid } = validate(&records);

    if valid.is_empty() {
        let sample = serde_json::to_value(invalid_sample(&invalid))
            .map_err(|e| AppError::internal(e.to_string()))?;
        return Err(AppError::new(ErrorCode::ImportNoValidRecords)
            .with_detail("invalid", invalid.len())
            .with_detail("invalid_sample", sample));
    }

    let inserted = store
        .insert_accreditations(&valid)
        .await
        .map_err(|e| AppError::from(ServiceError::Db(e)))?;

    if !invalid.is_empty() {
        tracing::warn!(
            file = %file_name,
            invalid = invalid.len(),
            "Skipped invalid rows during import"
        );
    }
    tracing::info!(file = %file_name, inserted, total = records.len(), "Bulk import stored");

    Ok(ImportSummary {
        message: format!("{inserted} accreditations imported"),
        inserted,
        total_rows: records.len(),
        invalid: invalid.len(),
        invalid_sample: invalid_sample(&invalid),
    })
}
