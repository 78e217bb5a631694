//! Application startup and lifecycle management.

use crate::config::ProductNotificationConfig;
use crate::handlers::{
    health_check, list_notifications, metrics_handler, not_found, readiness_check, root,
};
use crate::services::{init_metrics, Database, ProductSource};
use axum::{middleware, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::metrics::metrics_middleware;
use service_core::middleware::tracing::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ProductSource>,
    pub service_name: String,
}

impl AppState {
    pub fn new(source: Arc<dyn ProductSource>, service_name: impl Into<String>) -> Self {
        Self {
            source,
            service_name: service_name.into(),
        }
    }
}

/// HTTP routes of the service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/notifications", get(list_notifications))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Connects to PostgreSQL and syncs the `product` table before binding.
    pub async fn build(config: ProductNotificationConfig) -> Result<Self, AppError> {
        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        db.sync_schema().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to sync product schema");
            e
        })?;

        Self::build_with_source(config, Arc::new(db)).await
    }

    /// Build the application on top of an already constructed product source.
    pub async fn build_with_source(
        config: ProductNotificationConfig,
        source: Arc<dyn ProductSource>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState::new(source, config.service_name.clone());

        // Port 0 binds a random port (tests)
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %http_addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(http_port = http_port, "Product notification service listener bound");

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let http_router = router(self.state);

        tracing::info!(
            service = "product-notification-service",
            version = env!("CARGO_PKG_VERSION"),
            http_port = self.http_port,
            "Server running on http://localhost:{}",
            self.http_port
        );

        axum::serve(self.http_listener, http_router)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "HTTP server error");
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
