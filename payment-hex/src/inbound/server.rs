//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use cards_types::{ComplianceVerdictProvider, TransactionIdGenerator};

use super::handlers::{self, AppState};
use crate::PaymentService;

/// HTTP Server for the Payment API.
pub struct HttpServer<V, G>
where
    V: ComplianceVerdictProvider,
    G: TransactionIdGenerator,
{
    state: Arc<AppState<V, G>>,
}

impl<V, G> HttpServer<V, G>
where
    V: ComplianceVerdictProvider,
    G: TransactionIdGenerator,
{
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PaymentService<V, G>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/process_payment", post(handlers::process_payment::<V, G>))
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address until `shutdown` resolves.
    pub async fn run<F>(self, addr: &str, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Payment server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
