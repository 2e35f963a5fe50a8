//! # Payments Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging and optional OpenTelemetry export
//! - Initialize the repository adapter
//! - Create the payment service
//! - Start the HTTP server

mod config;

use axum::http::HeaderValue;
use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;

use config::{Config, LogFormat};

/// Span and metric providers that must be flushed on exit.
struct Telemetry {
    tracer_provider: sdktrace::SdkTracerProvider,
    meter_provider: SdkMeterProvider,
}

impl Telemetry {
    fn shutdown(self) {
        if let Err(e) = self.tracer_provider.shutdown() {
            eprintln!("failed to flush traces: {e}");
        }
        if let Err(e) = self.meter_provider.shutdown() {
            eprintln!("failed to flush metrics: {e}");
        }
    }
}

fn init_otel(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, Telemetry)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let tracer_provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .build();

    global::set_tracer_provider(tracer_provider.clone());

    // Feeds the HTTP metrics layer on the router
    let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let meter_provider = SdkMeterProvider::builder()
        .with_periodic_exporter(metric_exporter)
        .build();

    global::set_meter_provider(meter_provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    let tracer = tracer_provider.tracer("payments-service");

    Ok((
        tracer,
        Telemetry {
            tracer_provider,
            meter_provider,
        },
    ))
}

fn init_tracing(config: &Config) -> anyhow::Result<Option<Telemetry>> {
    let (otel_layer, telemetry) = match &config.otlp_endpoint {
        Some(endpoint) => {
            let (tracer, telemetry) = init_otel(endpoint)?;
            (
                Some(tracing_opentelemetry::layer().with_tracer(tracer)),
                Some(telemetry),
            )
        }
        None => (None, None),
    };

    let (text_layer, json_layer) = match config.log_format {
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,payments_app=debug,payments_hex=debug".into()),
        )
        .with(text_layer)
        .with(json_layer)
        .with(otel_layer)
        .init();

    Ok(telemetry)
}

fn parse_origins(origins: &[String]) -> anyhow::Result<Vec<HeaderValue>> {
    origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin `{}`: {}", o, e))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    let telemetry = init_tracing(&config)?;

    tracing::info!("Starting payments server on port {}", config.port);
    tracing::info!(
        "Using database backend: {}",
        config.database_url.split(':').next().unwrap_or_default()
    );

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Create the payment service
    let service = PaymentService::new(repo);

    // Create and run the HTTP server
    let server =
        HttpServer::new(service).with_cors_origins(parse_origins(&config.cors_allowed_origins)?);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces and metrics are flushed before exit
    if let Some(telemetry) = telemetry {
        telemetry.shutdown();
    }
    Ok(())
}
