//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use cards_types::{CardOwnershipStore, CredentialStore, StolenCardLedger};

use super::handlers::{self, AppState};
use crate::ComplianceService;

/// HTTP Server for the Compliance API.
pub struct HttpServer<U, C, L>
where
    U: CredentialStore,
    C: CardOwnershipStore,
    L: StolenCardLedger,
{
    state: Arc<AppState<U, C, L>>,
}

impl<U, C, L> HttpServer<U, C, L>
where
    U: CredentialStore,
    C: CardOwnershipStore,
    L: StolenCardLedger,
{
    /// Creates a new HTTP server with the given service.
    pub fn new(service: ComplianceService<U, C, L>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/report_cards", post(handlers::report_cards::<U, C, L>))
            .route("/check_user", get(handlers::check_user::<U, C, L>))
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
        tracing::info!("Compliance server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
