//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the compliance service.

mod handlers;
mod server;

pub use server::HttpServer;
