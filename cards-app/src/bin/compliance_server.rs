//! Compliance server: stolen-card reports and verdicts over HTTP.

use anyhow::Context;

use cards_app::{config::ComplianceConfig, shutdown_signal, telemetry};
use compliance_hex::{ComplianceService, inbound::HttpServer};
use compliance_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ComplianceConfig::from_env()?;
    let telemetry =
        telemetry::init_tracing("compliance-service", config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting compliance server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    if let Some(path) = &config.init_sql {
        let script = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        repo.run_script(&script).await?;
        tracing::info!("Applied seed script {}", path.display());
    }

    // One adapter serves all three store ports
    let service = ComplianceService::new(repo.clone(), repo.clone(), repo);

    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);
    server.run(&addr, shutdown_signal()).await?;

    // Ensure traces are flushed before exit
    telemetry.shutdown();
    Ok(())
}
