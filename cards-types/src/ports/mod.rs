//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod repository;
mod transaction_id;
mod verdict;

pub use repository::{CardOwnershipStore, CredentialStore, StolenCardLedger};
pub use transaction_id::TransactionIdGenerator;
pub use verdict::{ComplianceVerdictProvider, VerdictError};
