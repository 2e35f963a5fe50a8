//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Json, Router,
    http::HeaderValue,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use payments_types::PaymentRepository;

use super::handlers::{self, AppState};
use crate::PaymentService;
use crate::openapi::ApiDoc;

/// HTTP Server for the Payments API.
pub struct HttpServer<R: PaymentRepository> {
    state: Arc<AppState<R>>,
    cors_origins: Vec<HeaderValue>,
}

impl<R: PaymentRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PaymentService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            cors_origins: Vec::new(),
        }
    }

    /// Restricts CORS to the given origins. Without this, any origin is allowed.
    pub fn with_cors_origins(mut self, origins: Vec<HeaderValue>) -> Self {
        self.cors_origins = origins;
        self
    }

    fn cors_layer(&self) -> CorsLayer {
        if self.cors_origins.is_empty() {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(self.cors_origins.clone())
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/api-docs/openapi.json",
                get(|| async { Json(ApiDoc::openapi()) }),
            )
            .route("/api/payments", post(handlers::create_payment::<R>))
            .route("/api/payments/{id}", get(handlers::get_payment::<R>))
            .route(
                "/api/payments/order/{order_id}",
                get(handlers::get_payment_by_order::<R>),
            )
            .route(
                "/api/payments/admin/{id}/status",
                put(handlers::update_payment_status::<R>),
            )
            .route("/api/payments/admin", get(handlers::list_payments::<R>))
            .layer(metrics)
            .layer(self.cors_layer())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
