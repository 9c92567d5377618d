//! Unified error codes for the accreditation service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Accreditation errors
//! - 4xxx: Bulk import errors
//! - 5xxx: Attendance errors
//! - 6xxx: Notification errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the dashboard client
/// can branch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Bulk action issued with an empty selection
    NoSelection = 9,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Token is invalid or expired
    TokenInvalid = 1004,

    // ==================== 3xxx: Accreditation ====================
    /// Accreditation request not found
    AccreditationNotFound = 3001,
    /// Terms and conditions were not accepted
    TermsNotAccepted = 3002,
    /// Approval requires an assigned zone
    ZoneRequired = 3003,
    /// Record is not approved with a zone, so it cannot be notified
    NotEligibleForNotification = 3004,
    /// None of the selected records is eligible for the action
    NoEligibleRecords = 3005,

    // ==================== 4xxx: Bulk import ====================
    /// No file provided in request
    NoFileProvided = 4001,
    /// Empty file provided
    EmptyFile = 4002,
    /// File too large
    FileTooLarge = 4003,
    /// File could not be parsed
    ImportParseFailed = 4005,
    /// File contains no records
    ImportNoRecords = 4006,
    /// File contains no valid records
    ImportNoValidRecords = 4007,

    // ==================== 5xxx: Attendance ====================
    /// Event day outside the configured range
    InvalidAttendanceDay = 5001,

    // ==================== 6xxx: Notification ====================
    /// Email provider rejected or failed the delivery
    EmailDeliveryFailed = 6001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::NoSelection => "Select at least one record",

            // Auth
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::TokenInvalid => "Session token is invalid or expired",

            // Accreditation
            ErrorCode::AccreditationNotFound => "Accreditation not found",
            ErrorCode::TermsNotAccepted => "Terms and conditions must be accepted",
            ErrorCode::ZoneRequired => "A zone must be assigned before approval",
            ErrorCode::NotEligibleForNotification => {
                "Accreditation must be approved and have a zone before notifying"
            }
            ErrorCode::NoEligibleRecords => "None of the selected records is eligible",

            // Bulk import
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "File is empty",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::ImportParseFailed => "File could not be parsed",
            ErrorCode::ImportNoRecords => "File contains no records",
            ErrorCode::ImportNoValidRecords => "No valid records, check the template",

            // Attendance
            ErrorCode::InvalidAttendanceDay => "Invalid event day",

            // Notification
            ErrorCode::EmailDeliveryFailed => "Email delivery failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::NoSelection),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Accreditation
            3001 => Ok(ErrorCode::AccreditationNotFound),
            3002 => Ok(ErrorCode::TermsNotAccepted),
            3003 => Ok(ErrorCode::ZoneRequired),
            3004 => Ok(ErrorCode::NotEligibleForNotification),
            3005 => Ok(ErrorCode::NoEligibleRecords),

            // Bulk import
            4001 => Ok(ErrorCode::NoFileProvided),
            4002 => Ok(ErrorCode::EmptyFile),
            4003 => Ok(ErrorCode::FileTooLarge),
            4005 => Ok(ErrorCode::ImportParseFailed),
            4006 => Ok(ErrorCode::ImportNoRecords),
            4007 => Ok(ErrorCode::ImportNoValidRecords),

            // Attendance
            5001 => Ok(ErrorCode::InvalidAttendanceDay),

            // Notification
            6001 => Ok(ErrorCode::EmailDeliveryFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::ValidationFailed,
        ErrorCode::InvalidRequest,
        ErrorCode::RequiredField,
        ErrorCode::NoSelection,
        ErrorCode::NotAuthenticated,
        ErrorCode::TokenInvalid,
        ErrorCode::AccreditationNotFound,
        ErrorCode::TermsNotAccepted,
        ErrorCode::ZoneRequired,
        ErrorCode::NotEligibleForNotification,
        ErrorCode::NoEligibleRecords,
        ErrorCode::NoFileProvided,
        ErrorCode::EmptyFile,
        ErrorCode::FileTooLarge,
        ErrorCode::ImportParseFailed,
        ErrorCode::ImportNoRecords,
        ErrorCode::ImportNoValidRecords,
        ErrorCode::InvalidAttendanceDay,
        ErrorCode::EmailDeliveryFailed,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
    ];

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NoSelection.code(), 9);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::ZoneRequired.code(), 3003);
        assert_eq!(ErrorCode::ImportNoValidRecords.code(), 4007);
        assert_eq!(ErrorCode::InvalidAttendanceDay.code(), 5001);
        assert_eq!(ErrorCode::EmailDeliveryFailed.code(), 6001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_roundtrips_every_code() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(*code));
        }
    }

    #[test]
    fn test_try_from_unknown_value() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_every_code_has_message() {
        for code in ALL {
            assert!(!code.message().is_empty(), "{code:?} has no message");
        }
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::ZoneRequired).unwrap();
        assert_eq!(json, "3003");
        let code: ErrorCode = serde_json::from_str("4006").unwrap();
        assert_eq!(code, ErrorCode::ImportNoRecords);
    }
}
