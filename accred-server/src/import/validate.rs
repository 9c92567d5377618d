//! Row validation for bulk uploads

use serde::Serialize;
use shared::models::{AccreditationCreate, Area};

use super::columns::RawRecord;

pub const REASON_MISSING_FIELDS: &str = "missing required fields (name, surname, email or area)";
pub const REASON_INVALID_EMAIL: &str = "email address is not valid";

/// A rejected row. `row` is the 1-based spreadsheet row (header is row 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidRow {
    pub row: usize,
    pub reason: &'static str,
}

/// Every parsed record ends up in exactly one of the two lists.
#[derive(Debug, Default)]
pub struct Validation {
    pub valid: Vec<AccreditationCreate>,
    pub invalid: Vec<InvalidRow>,
}

pub fn validate(records: &[RawRecord]) -> Validation {
    let mut out = Validation::default();

    for (index, record) in records.iter().enumerate() {
        match validate_record(record) {
            Ok(row) => out.valid.push(row),
            Err(reason) => out.invalid.push(InvalidRow {
                row: index + 2,
                reason,
            }),
        }
    }
    out
}

fn validate_record(record: &RawRecord) -> Result<AccreditationCreate, &'static str> {
    let first_name = record.first_name.trim();
    let last_name = record.last_name.trim();
    let email = record.email.trim().to_lowercase();
    let area = Area::parse(&record.area);

    let Some(area) = area.filter(|_| !first_name.is_empty() && !last_name.is_empty() && !email.is_empty())
    else {
        return Err(REASON_MISSING_FIELDS);
    };

    if !email.contains('@') {
        return Err(REASON_INVALID_EMAIL);
    }

    let company = record.company.trim();
    Ok(AccreditationCreate {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        document: record.document.trim().to_string(),
        email,
        company: (!company.is_empty()).then(|| company.to_string()),
        area,
    })
}
