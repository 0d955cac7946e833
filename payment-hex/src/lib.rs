//! # Payment Hex
//!
//! Payment engine and HTTP adapter for the payment gateway.
//!
//! ## Architecture
//!
//! - `service` - Application service (verdict gate, id issuance)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `transaction_ids` - Production `TransactionIdGenerator`
//!
//! The service is generic over `V: ComplianceVerdictProvider` and
//! `G: TransactionIdGenerator`.

pub mod inbound;
pub mod openapi;
pub mod service;
pub mod transaction_ids;


pub use service::PaymentService;
pub use transaction_ids::RandomTransactionIds;
