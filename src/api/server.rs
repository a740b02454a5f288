//! jsonsheet API Server implementation
//!
//! HTTP server using Axum. Accepts JSON uploads and answers with the
//! converted workbook; optionally serves a static upload page.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::projector::ProjectionOptions;

/// Uploads larger than this are rejected before conversion (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Seconds a single conversion may run
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub timeout_secs: u64,
    /// Directory served for any path no route matches
    pub static_dir: Option<PathBuf>,
    pub options: ProjectionOptions,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            static_dir: None,
            options: ProjectionOptions::default(),
        }
    }
}

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub version: String,
    pub options: ProjectionOptions,
    pub timeout: Duration,
}

impl AppState {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            options: config.options.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Build the router with all routes and middleware
pub fn build_router(config: &ApiConfig) -> Router {
    let state = Arc::new(AppState::from_config(config));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        // Health and info endpoints
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/api/v1", get(handlers::root))
        // Conversion endpoints
        .route("/api/v1/convert", post(handlers::convert))
        .route("/convert/json-to-excel", post(handlers::convert));

    app = match &config.static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.route("/", get(handlers::root)),
    };

    app.with_state(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jsonsheet=info,tower_http=info".into()),
        )
        .init();

    let app = build_router(&config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("jsonsheet API Server starting on http://{}", addr);
    info!("   Endpoints: POST /api/v1/convert (multipart field 'file')");
    info!("   Health: /health, Version: /version");
    if let Some(dir) = &config.static_dir {
        info!("   Static files: {}", dir.display());
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("jsonsheet API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
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
                tracing::error!("failed to install signal handler: {}", e);
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

    info!("Shutdown signal received, stopping server...");
}
