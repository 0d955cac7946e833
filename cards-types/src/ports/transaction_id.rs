//! Transaction id generator port.

use crate::domain::TransactionRef;

/// Hands out identifiers for approved payments.
///
/// Injected into the payment service so tests can assert on exact ids.
pub trait TransactionIdGenerator: Send + Sync + 'static {
    fn next_id(&self) -> TransactionRef;
}
