//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CardId, ComplianceVerdict, UserId};
use crate::error::PaymentError;

// ─────────────────────────────────────────────────────────────────────────────
// Compliance DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Form body for reporting a user's cards as stolen.
///
/// Missing fields deserialize as empty strings so the handler can answer
/// with its own validation message.
#[derive(Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ReportStolenForm {
    #[schema(example = "john_doe")]
    pub user_name: String,
    #[schema(example = "secure123")]
    pub secret_code: String,
}

impl ReportStolenForm {
    pub fn is_complete(&self) -> bool {
        !self.user_name.is_empty() && !self.secret_code.is_empty()
    }
}

impl std::fmt::Debug for ReportStolenForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportStolenForm")
            .field("user_name", &self.user_name)
            .field("secret_code", &"<redacted>")
            .finish()
    }
}

/// Raw query parameters of the status check.
///
/// Kept as strings: a missing parameter and an unparsable one get different
/// responses.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckStatusParams {
    /// User identifier (integer)
    #[param(example = "1")]
    pub user_id: Option<String>,
    /// Card identifier (integer)
    #[param(example = "1")]
    pub card_id: Option<String>,
}

/// Wire shape of a compliance verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComplianceStatusResponse {
    /// Whether the card may transact. The misspelled key is part of the
    /// published wire format.
    #[serde(rename = "complaiance")]
    pub compliant: bool,
    #[schema(example = "user is compliant")]
    pub message: String,
}

impl From<ComplianceVerdict> for ComplianceStatusResponse {
    fn from(verdict: ComplianceVerdict) -> Self {
        Self {
            compliant: verdict.compliant,
            message: verdict.message,
        }
    }
}

impl From<ComplianceStatusResponse> for ComplianceVerdict {
    fn from(resp: ComplianceStatusResponse) -> Self {
        ComplianceVerdict::new(resp.compliant, resp.message)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to authorize and process a payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PaymentRequest {
    #[schema(value_type = i64, example = 1)]
    pub user_id: UserId,
    #[schema(value_type = i64, example = 1)]
    pub card_id: CardId,
    /// Amount to charge, must be positive
    #[schema(example = 49.99)]
    pub amount: f64,
}

impl PaymentRequest {
    pub const INVALID_MESSAGE: &'static str = "user id, card id and valid amount are required";

    /// Rejects missing identifiers and non-positive amounts. NaN fails the
    /// `> 0.0` comparison, so it is rejected as well.
    pub fn validate(&self) -> Result<(), PaymentError> {
        let amount_ok = self.amount > 0.0 && self.amount.is_finite();
        if !self.user_id.is_valid() || !self.card_id.is_valid() || !amount_ok {
            return Err(PaymentError::InvalidRequest(Self::INVALID_MESSAGE.into()));
        }
        Ok(())
    }
}

/// Single-message JSON body used by the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "payment successful. Transaction ID: txn_1234567")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
