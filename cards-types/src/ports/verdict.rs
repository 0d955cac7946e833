//! Compliance verdict provider port.
//!
//! The payment service asks this port whether a card may transact.
//! Implementations can be HTTP clients, mock providers, etc.

use crate::domain::{CardId, ComplianceVerdict, UserId};

/// Why a verdict could not be obtained.
///
/// The display text is what the payer sees after "payment denied: ", so
/// transport details stay out of it.
#[derive(Debug, thiserror::Error)]
pub enum VerdictError {
    #[error("error communicating with compliance service")]
    Transport(String),

    #[error("compliance service timed out")]
    Timeout,

    #[error("compliance service returned status code: {0}")]
    Status(u16),

    #[error("error processing compliance response")]
    Malformed(String),
}

/// Port trait for compliance verdict providers.
#[async_trait::async_trait]
pub trait ComplianceVerdictProvider: Send + Sync + 'static {
    /// Gets the verdict for a (user, card) pair. Exactly one attempt; callers
    /// must treat any error as a denial.
    async fn check_compliance(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<ComplianceVerdict, VerdictError>;
}
