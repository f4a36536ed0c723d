//! Error types for the domain layer.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    ClubNotFound,
    MembershipNotFound,

    // State errors
    InvalidStateTransition,
    AlreadyMember,
    AlreadyWaiting,
    RejoinBlocked,
    ClubAlreadyFounded,

    // Authorization errors
    Forbidden,

    // Infrastructure errors
    DatabaseError,
    NotificationFailed,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ClubNotFound => "CLUB_NOT_FOUND",
            ErrorCode::MembershipNotFound => "MEMBERSHIP_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::AlreadyMember => "ALREADY_MEMBER",
            ErrorCode::AlreadyWaiting => "ALREADY_WAITING",
            ErrorCode::RejoinBlocked => "REJOIN_BLOCKED",
            ErrorCode::ClubAlreadyFounded => "CLUB_ALREADY_FOUNDED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::NotificationFailed => "NOTIFICATION_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// This is the error type every port returns.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => {
                field
            }
        }
    }
}

/// Keeps the field name as the `field` detail.
impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::new(ErrorCode::ValidationFailed, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("member_id");
        assert_eq!(format!("{}", err), "Field 'member_id' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("status", "unknown value PAUSED");
        assert_eq!(
            format!("{}", err),
            "Field 'status' has invalid format: unknown value PAUSED"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ClubNotFound, "Club not found");
        assert_eq!(format!("{}", err), "[CLUB_NOT_FOUND] Club not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::database("constraint violated")
            .with_detail("table", "club_members")
            .with_detail("constraint", "club_members_live_key");

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.details.get("table"), Some(&"club_members".to_string()));
    }

    #[test]
    fn validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::empty_field("member_id").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("member_id"));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::RejoinBlocked), "REJOIN_BLOCKED");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
