//! Error types for the payment service.

use crate::domain::PaymentStatus;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid payment status: {0}")]
    InvalidStatus(String),

    #[error("Cannot change payment status from {from} to {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
            DomainError::InvalidStatus(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Conflict(e) => AppError::Conflict(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_status_is_bad_request() {
        let err: AppError = DomainError::InvalidStatus("SHIPPED".into()).into();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("SHIPPED")));
    }

    #[test]
    fn test_invalid_transition_is_conflict() {
        let err: AppError = RepoError::Domain(DomainError::InvalidTransition {
            from: PaymentStatus::Refunded,
            to: PaymentStatus::Paid,
        })
        .into();
        assert!(matches!(err, AppError::Conflict(msg) if msg.contains("REFUNDED")));
    }

    #[test]
    fn test_validation_error_keeps_message() {
        let err: AppError = DomainError::ValidationError("Amount must be positive".into()).into();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Amount must be positive"));
    }

    #[test]
    fn test_conflict_passes_through() {
        let err: AppError = RepoError::Conflict("Payment 1 is PAID, expected PENDING".into()).into();
        assert!(matches!(err, AppError::Conflict(msg) if msg.contains("expected PENDING")));
    }

    #[test]
    fn test_database_error_is_internal() {
        let err: AppError = RepoError::Database("disk full".into()).into();
        assert!(matches!(err, AppError::Internal(msg) if msg == "disk full"));
    }
}
