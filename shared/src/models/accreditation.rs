//! Accreditation Request Model

use serde::{Deserialize, Serialize};

use super::area::Area;
use crate::util::fold_key;
use super::zone::Zone;

/// Review status of an accreditation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "accreditation_status"))]
pub enum AccreditationStatus {
    #[serde(rename = "pendiente", alias = "pending")]
    #[cfg_attr(feature = "db", sqlx(rename = "pendiente"))]
    Pending,
    #[serde(rename = "aprobado", alias = "approved")]
    #[cfg_attr(feature = "db", sqlx(rename = "aprobado"))]
    Approved,
    #[serde(rename = "rechazado", alias = "rejected")]
    #[cfg_attr(feature = "db", sqlx(rename = "rechazado"))]
    Rejected,
}

impl AccreditationStatus {
    /// Label used in exports
    pub const fn label(&self) -> &'static str {
        match self {
            AccreditationStatus::Pending => "Pendiente",
            AccreditationStatus::Approved => "Aprobado",
            AccreditationStatus::Rejected => "Rechazado",
        }
    }

    /// Accepts the stored value, the English alias or the label, any casing.
    pub fn parse(value: &str) -> Option<AccreditationStatus> {
        match fold_key(value).as_str() {
            "pendiente" | "pending" => Some(AccreditationStatus::Pending),
            "aprobado" | "approved" => Some(AccreditationStatus::Approved),
            "rechazado" | "rejected" => Some(AccreditationStatus::Rejected),
            _ => None,
        }
    }
}

/// Accreditation request entity (one applicant, one area)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Accreditation {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// RUT, DNI or passport number, stored as typed (no check digit validation)
    pub document: String,
    pub email: String,
    pub company: Option<String>,
    pub area: Area,
    pub status: AccreditationStatus,
    pub zone: Option<Zone>,
    /// Unix millis
    pub created_at: i64,
}

impl Accreditation {
    /// Approved and zoned: the only records an approval email may go to.
    pub fn is_notifiable(&self) -> bool {
        self.status == AccreditationStatus::Approved && self.zone.is_some()
    }
}

/// New accreditation row. Always inserted as pending without a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccreditationCreate {
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub email: String,
    pub company: Option<String>,
    pub area: Area,
}

/// Exact-match filters pushed down to the datastore
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccreditationFilter {
    pub area: Option<Area>,
    pub status: Option<AccreditationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: AccreditationStatus, zone: Option<Zone>) -> Accreditation {
        Accreditation {
            id: 1,
            first_name: "Juan".into(),
            last_name: "Perez".into(),
            document: "12345678-K".into(),
            email: "juan@example.com".into(),
            company: None,
            area: Area::Press,
            status,
            zone,
            created_at: 0,
        }
    }

    #[test]
    fn test_is_notifiable_requires_approval_and_zone() {
        assert!(sample(AccreditationStatus::Approved, Some(Zone::Media)).is_notifiable());
        assert!(!sample(AccreditationStatus::Approved, None).is_notifiable());
        assert!(!sample(AccreditationStatus::Pending, Some(Zone::Media)).is_notifiable());
        assert!(!sample(AccreditationStatus::Rejected, Some(Zone::Media)).is_notifiable());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&AccreditationStatus::Approved).unwrap(),
            "\"aprobado\""
        );
        let s: AccreditationStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(s, AccreditationStatus::Rejected);
        let s: AccreditationStatus = serde_json::from_str("\"pendiente\"").unwrap();
        assert_eq!(s, AccreditationStatus::Pending);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(AccreditationStatus::parse(" Aprobado "), Some(AccreditationStatus::Approved));
        assert_eq!(AccreditationStatus::parse("PENDING"), Some(AccreditationStatus::Pending));
        assert_eq!(AccreditationStatus::parse("archived"), None);
        assert_eq!(AccreditationStatus::parse(""), None);
    }

    #[test]
    fn test_accreditation_json_shape() {
        let json = serde_json::to_value(sample(AccreditationStatus::Pending, None)).unwrap();
        assert_eq!(json["status"], "pendiente");
        assert_eq!(json["area"], "Prensa");
        assert!(json["zone"].is_null());
    }
}
