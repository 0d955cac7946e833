//! # Compliance Hex
//!
//! Compliance engine and its HTTP adapter.
//!
//! ## Architecture
//!
//! - `service/` - Application service (report stolen cards, check status)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over one adapter per store port, so the SQL
//! repository and in-memory test doubles plug in the same way.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{ComplianceService, ReportOutcome};
