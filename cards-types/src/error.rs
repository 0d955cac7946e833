//! Error types for the compliance and payment services.

use crate::ports::VerdictError;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Secret hashing failed: {0}")]
    Hashing(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by the compliance engine.
///
/// Negative verdicts (card not owned, card reported) are NOT errors; they come
/// back as a [`crate::ComplianceVerdict`].
#[derive(Debug, thiserror::Error)]
pub enum ComplianceError {
    #[error("user not found")]
    UserNotFound,

    #[error("invalid user name or secret code")]
    InvalidCredentials,

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: RepoError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ComplianceError {
    /// Builds a closure for `map_err` that tags a store failure with context.
    pub fn store(context: &'static str) -> impl FnOnce(RepoError) -> Self {
        move |source| ComplianceError::Store { context, source }
    }
}

/// Errors surfaced by the payment engine.
///
/// `Denied` and `Upstream` both fail the payment closed; they differ only in
/// whether a verdict was actually obtained.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("payment denied: {0}")]
    Denied(String),

    #[error("payment denied: {0}")]
    Upstream(#[from] VerdictError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_keeps_source_text() {
        let err = ComplianceError::store("error retrieving user cards")(RepoError::Database(
            "disk I/O error".into(),
        ));
        assert_eq!(
            err.to_string(),
            "error retrieving user cards: Database error: disk I/O error"
        );
    }

    #[test]
    fn test_denied_and_upstream_render_the_same_prefix() {
        let denied = PaymentError::Denied(crate::ComplianceVerdict::BLOCKED.into());
        let upstream = PaymentError::from(VerdictError::Status(500));

        assert_eq!(
            denied.to_string(),
            "payment denied: user is currently blocked due to reported stolen card(s)"
        );
        assert_eq!(
            upstream.to_string(),
            "payment denied: compliance service returned status code: 500"
        );
    }
}
