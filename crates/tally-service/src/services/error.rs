//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;
use tally_common::error::domain_status;
use tally_common::AppError;
use tally_core::DomainError;
use validator::ValidationErrors;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation, including record validation
    Domain(DomainError),

    /// Application error (auth, config, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Acting user's role does not allow the action
    PermissionDenied { action: String },

    /// Malformed input that never reached a record
    Validation(String),

    /// Conflict (e.g., duplicate resource)
    Conflict(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::PermissionDenied { action } => write!(f, "Not allowed to {action}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(action: impl Into<String>) -> Self {
        Self::PermissionDenied {
            action: action.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::PermissionDenied { .. } => 403,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PermissionDenied { .. } => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Domain(DomainError::Validation(errors))
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::PermissionDenied { action: _ } => AppError::InsufficientPermissions,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{ClientId, CompanyRole};

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Client", 123);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Client not found: 123"));
    }

    #[test]
    fn test_permission_denied_error() {
        let err = ServiceError::permission_denied("discard clients");
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "INSUFFICIENT_PERMISSIONS");
        assert_eq!(err.to_string(), "Not allowed to discard clients");
    }

    #[test]
    fn test_record_validation_is_unprocessable() {
        let err: ServiceError = DomainError::field("email", "taken", "has already been taken").into();
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "RECORD_INVALID");
    }

    #[test]
    fn test_domain_statuses() {
        assert_eq!(ServiceError::from(DomainError::ClientNotFound(ClientId::new(1))).status_code(), 404);
        assert_eq!(
            ServiceError::from(DomainError::InsufficientRole(CompanyRole::Employee)).status_code(),
            403
        );
        assert_eq!(ServiceError::from(DomainError::AlreadyBilled).status_code(), 409);
        assert_eq!(
            ServiceError::from(DomainError::DatabaseError("boom".into())).status_code(),
            500
        );
    }

    #[test]
    fn test_conflict_error() {
        let err = ServiceError::conflict("Entry already billed");
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::not_found("Project", 456).into();
        assert_eq!(app_err.status_code(), 404);

        let app_err: AppError = ServiceError::from(DomainError::NoCurrentWorkspace).into();
        assert_eq!(app_err.error_code(), "NO_WORKSPACE");
    }
}
