//! Domain models for the compliance and payment services.

pub mod credentials;
pub mod ids;
pub mod payment;
pub mod verdict;

pub use credentials::{DEFAULT_HASH_COST, SecretHash, UserCredentials};
pub use ids::{CardId, UserId};
pub use payment::{PaymentReceipt, TransactionRef};
pub use verdict::ComplianceVerdict;
