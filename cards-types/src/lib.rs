//! # Cards Types
//!
//! Domain types and port traits shared by the compliance and payment services.
//! Nothing in here talks to a database or the network - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal architecture:
//! - `domain/` - Identifiers, credentials, verdicts and payment receipts
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for the HTTP boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CardId, ComplianceVerdict, DEFAULT_HASH_COST, PaymentReceipt, SecretHash, TransactionRef,
    UserCredentials, UserId,
};
pub use dto::*;
pub use error::{ComplianceError, DomainError, PaymentError, RepoError};
pub use ports::{
    CardOwnershipStore, ComplianceVerdictProvider, CredentialStore, StolenCardLedger,
    TransactionIdGenerator, VerdictError,
};
