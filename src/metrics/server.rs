//! HTTP exporter for the Prometheus metrics endpoint.
//!
//! The exporter is pull-based: each scrape of `/metrics` asks the
//! engine for a fresh snapshot through a caller-supplied closure, so
//! no refresh loop runs between scrapes and an idle engine costs
//! nothing.

use crate::metrics::{MetricsError, MetricsRegistry, MetricsSnapshot};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;

/// Produces the current engine snapshot for a scrape.
///
/// Typically wraps [`crate::engine::MotionEngine::metrics_snapshot`].
pub type SnapshotFn = Arc<dyn Fn() -> MetricsSnapshot + Send + Sync>;

/// Errors that can occur while serving metrics.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsServerConfig {
    /// Address to bind the exporter to.
    pub bind_addr: SocketAddr,
}

impl Default for MetricsServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], 9090).into(),
        }
    }
}

impl MetricsServerConfig {
    /// Creates a config with a custom port.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], port).into(),
        }
    }
}

/// Registry plus the snapshot source it renders from.
pub struct MetricsState {
    registry: MetricsRegistry,
    source: SnapshotFn,
}

impl MetricsState {
    /// Pulls a fresh engine snapshot, folds it into the registry and
    /// encodes the result in Prometheus text format.
    pub fn render(&self) -> Result<String, MetricsError> {
        let snapshot = (self.source)();
        self.registry.update(&snapshot);
        self.registry.encode()
    }
}

/// HTTP exporter serving `/metrics` and `/health`.
pub struct MetricsServer {
    config: MetricsServerConfig,
    state: Arc<MetricsState>,
}

impl MetricsServer {
    /// Creates an exporter over the given registry and snapshot source.
    pub fn new(config: MetricsServerConfig, registry: MetricsRegistry, source: SnapshotFn) -> Self {
        Self {
            config,
            state: Arc::new(MetricsState { registry, source }),
        }
    }

    /// Runs the exporter until it is shut down.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .with_state(self.state);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!(addr = %self.config.bind_addr, "metrics exporter listening");

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(e.to_string()))?;

        Ok(())
    }
}

async fn metrics_handler(State(state): State<Arc<MetricsState>>) -> impl IntoResponse {
    match state.render() {
        Ok(output) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            output,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("failed to encode metrics: {}", e),
        ),
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
