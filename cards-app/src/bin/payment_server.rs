//! Payment server: authorizes payments after a compliance check.

use cards_app::{config::PaymentConfig, shutdown_signal, telemetry};
use cards_client::ComplianceClient;
use payment_hex::{PaymentService, RandomTransactionIds, inbound::HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = PaymentConfig::from_env()?;
    let telemetry = telemetry::init_tracing("payment-service", config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting payment server on port {}", config.port);
    tracing::info!(
        "Using compliance service: {} (timeout {:?})",
        config.compliance_service_url,
        config.compliance_timeout
    );

    let verdicts = ComplianceClient::new(&config.compliance_service_url)
        .with_timeout(config.compliance_timeout);
    let service = PaymentService::new(verdicts, RandomTransactionIds);

    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);
    server.run(&addr, shutdown_signal()).await?;

    telemetry.shutdown();
    Ok(())
}
