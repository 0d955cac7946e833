//! Payment receipt domain model.

use serde::{Deserialize, Serialize};

/// Identifier handed out for an approved payment (e.g. `txn_4821937`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionRef(String);

impl TransactionRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of an approved payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub transaction_id: TransactionRef,
}

impl PaymentReceipt {
    pub fn new(transaction_id: TransactionRef) -> Self {
        Self { transaction_id }
    }

    /// Confirmation text returned to the caller.
    pub fn message(&self) -> String {
        format!(
            "payment successful. Transaction ID: {}",
            self.transaction_id
        )
    }
}
