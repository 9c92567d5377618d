//! Public accreditation form

use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Accreditation, AccreditationCreate, Area};

use crate::db::Datastore;
use crate::error::ServiceResult;

/// Form payload as typed by the applicant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionRequest {
    pub area: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub document: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub accepted_terms: bool,
}

impl SubmissionRequest {
    /// Terms first, so a rejected submission never reaches the store.
    pub fn validate(&self) -> Result<AccreditationCreate, AppError> {
        if !self.accepted_terms {
            return Err(AppError::new(ErrorCode::TermsNotAccepted));
        }

        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Name and surname are required",
            ));
        }

        let area = Area::parse(&self.area).ok_or_else(|| {
            AppError::validation(format!("Unknown area: {}", self.area.trim()))
                .with_detail("allowed", Area::ALL.map(|a| a.label()).to_vec())
        })?;

        let email = self.email.trim().to_lowercase();

        Ok(AccreditationCreate {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            document: self.document.trim().to_string(),
            email,
            company: self
                .company
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            area,
        })
    }
}

pub async fn submit(store: &dyn Datastore, request: &SubmissionRequest) -> ServiceResult<Accreditation> {
    let row = request.validate()?;
    let created = store.insert_accreditation(&row).await?;
    tracing::info!(id = created.id, area = %created.area, "Accreditation submitted");
    Ok(created)
}
