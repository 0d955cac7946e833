//! Tracing subscriber and optional OpenTelemetry span export.

use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,compliance_hex=debug,payment_hex=debug,cards_app=debug";

/// Keeps the tracer provider alive; call `shutdown` to flush spans.
pub struct Telemetry {
    provider: Option<sdktrace::SdkTracerProvider>,
}

impl Telemetry {
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "failed to flush traces");
            }
        }
    }
}

fn init_tracer_provider(endpoint: &str) -> anyhow::Result<sdktrace::SdkTracerProvider> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());
    Ok(provider)
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Spans are exported only when an OTLP endpoint is given.
pub fn init_tracing(
    service_name: &'static str,
    otlp_endpoint: Option<&str>,
) -> anyhow::Result<Telemetry> {
    let provider = otlp_endpoint.map(init_tracer_provider).transpose()?;
    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(service_name)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(otel_layer)
        .try_init()?;

    Ok(Telemetry { provider })
}
