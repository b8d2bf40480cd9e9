//! HTTP server implementation

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

/// Payload returned by the health routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Bot is running!".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("failed to bind health server on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("health server stopped: {0}")]
    Serve(#[source] std::io::Error),
}

/// Create the axum router with both health routes
pub fn router() -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
}

/// Start the health server
///
/// # Arguments
/// * `host` - Host to bind to (e.g., "0.0.0.0")
/// * `port` - Port to bind to (e.g., 8080)
pub async fn serve(host: &str, port: u16) -> Result<(), HealthError> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| HealthError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Health server listening on {}", addr);

    axum::serve(listener, router())
        .await
        .map_err(HealthError::Serve)
}

async fn health_check() -> impl IntoResponse {
    Json(HealthStatus::default())
}
