//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://database/compliance.db?mode=rwc";
pub const DEFAULT_COMPLIANCE_URL: &str = "http://localhost:8080";

/// Reads a variable, treating empty values as unset.
fn var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_port<F>(lookup: &F, default: u16) -> anyhow::Result<u16>
where
    F: Fn(&str) -> Option<String>,
{
    match var(lookup, "PORT") {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid PORT: {}", raw)),
        None => Ok(default),
    }
}

/// Compliance service configuration.
#[derive(Debug, Clone)]
pub struct ComplianceConfig {
    pub port: u16,
    pub database_url: String,
    /// SQL script run once after migrations (seed data).
    pub init_sql: Option<PathBuf>,
    pub otlp_endpoint: Option<String>,
}

impl ComplianceConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_port(&lookup, 8080)?,
            database_url: var(&lookup, "DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            init_sql: var(&lookup, "INIT_SQL").map(PathBuf::from),
            otlp_endpoint: var(&lookup, "OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}

/// Payment gateway configuration.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub port: u16,
    pub compliance_service_url: String,
    /// Bound on a single verdict call.
    pub compliance_timeout: Duration,
    pub otlp_endpoint: Option<String>,
}

impl PaymentConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms: u64 = match var(&lookup, "COMPLIANCE_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid COMPLIANCE_TIMEOUT_MS: {}", raw))?,
            None => 5000,
        };

        Ok(Self {
            port: parse_port(&lookup, 8081)?,
            compliance_service_url: var(&lookup, "COMPLIANCE_SERVICE_URL")
                .unwrap_or_else(|| DEFAULT_COMPLIANCE_URL.to_string()),
            compliance_timeout: Duration::from_millis(timeout_ms),
            otlp_endpoint: var(&lookup, "OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}
